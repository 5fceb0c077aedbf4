//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use soplint_core::LintReport;

pub fn output_json(report: &LintReport) -> Result<()> {
    println!("{}", report.to_json().into_diagnostic()?);
    Ok(())
}
