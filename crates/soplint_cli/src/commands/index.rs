//! Index command implementation

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use soplint_core::index::{render, write_new_file};
use soplint_core::{IndexFormat, IndexGenerator};
use tracing::info;

use crate::cli::Cli;
use crate::utils::{collect_inputs, load_config};

pub fn run_index(
    cli: &Cli,
    inputs: &[PathBuf],
    format: IndexFormat,
    output: Option<&Path>,
) -> Result<bool> {
    let config = load_config(cli)?;
    let files = collect_inputs(&config, inputs)?;

    let entries = IndexGenerator::new().parse_all(&files).into_diagnostic()?;
    let rendered = render(&entries, format).into_diagnostic()?;

    match output {
        Some(path) => {
            write_new_file(path, &rendered).into_diagnostic()?;
            info!("Wrote index of {} SOPs to {}", entries.len(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(false)
}
