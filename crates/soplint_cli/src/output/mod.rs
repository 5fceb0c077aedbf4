//! Output formatting module

mod json;
mod text;

use miette::Result;
use soplint_core::LintReport;

use crate::cli::OutputFormat;

pub fn output_report(report: &LintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(report)?,
        OutputFormat::Text => text::output_text(report),
    }
    Ok(())
}
