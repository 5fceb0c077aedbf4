//! Lint command implementation

use std::path::PathBuf;
use std::time::Duration;

use miette::{IntoDiagnostic, Result};
use soplint_core::{LintContext, Linter, RemoteProbe};
use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::output::output_report;
use crate::utils::{BlockingProbe, collect_inputs, load_config};

pub fn run_lint(
    cli: &Cli,
    inputs: &[PathBuf],
    strict: bool,
    no_remote: bool,
    format: OutputFormat,
) -> Result<bool> {
    let config = load_config(cli)?;
    let files = collect_inputs(&config, inputs)?;

    let probe = if config.check_remote && !no_remote {
        Some(BlockingProbe::new(Duration::from_secs(
            config.request_timeout_secs,
        ))?)
    } else {
        info!("Remote link checks are disabled");
        None
    };

    let linter = Linter::new(config).into_diagnostic()?.with_strict(strict);
    let mut ctx = LintContext::new(&files, linter.config())
        .with_probe(probe.as_ref().map(|p| p as &dyn RemoteProbe));

    let report = linter.lint_files(&mut ctx).into_diagnostic()?;

    if cli.verbosity > 0 {
        output_report(&report, format)?;
    }

    Ok(report.has_errors())
}
