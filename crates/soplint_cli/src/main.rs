//! soplint CLI
//!
//! Lints, indexes and schedules reviews of SOP markdown documents.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_compare_index, run_index, run_lint, run_review};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Maps the verbosity level to a log filter. Level 2 adds debug logs of the
/// soplint crates only.
fn log_filter(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::new("error"),
        1 => EnvFilter::new("warn"),
        _ => EnvFilter::new("warn,soplint=debug,soplint_core=debug,soplint_remote=debug"),
    }
}

/// Runs the selected command. `Ok(true)` means findings that fail the run.
fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint {
            inputs,
            strict,
            no_remote,
            format,
        } => run_lint(cli, inputs, *strict, *no_remote, *format),
        Commands::Index {
            inputs,
            format,
            output,
        } => run_index(cli, inputs, *format, output.as_deref()),
        Commands::CompareIndex { existing, inputs } => run_compare_index(cli, existing, inputs),
        Commands::Review {
            inputs,
            days_review,
            create_issues,
            repository,
            api_url,
        } => run_review(
            cli,
            inputs,
            *days_review,
            *create_issues,
            repository.as_deref(),
            api_url,
        ),
    }
}
