//! Compare-index command implementation

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use soplint_core::{IndexGenerator, IndexTable, compare_indexes};
use tracing::debug;

use crate::cli::Cli;
use crate::utils::{collect_inputs, load_config};

/// Returns `true` when the indexes differ.
pub fn run_compare_index(cli: &Cli, existing: &Path, inputs: &[PathBuf]) -> Result<bool> {
    let config = load_config(cli)?;

    debug!("Reading existing index from {}", existing.display());
    let existing_table = IndexTable::read_markdown(existing).into_diagnostic()?;
    existing_table
        .check_duplicates(&existing.display().to_string())
        .into_diagnostic()?;

    debug!("Generating new index from {:?}", inputs);
    let files = collect_inputs(&config, inputs)?;
    let entries = IndexGenerator::new().parse_all(&files).into_diagnostic()?;
    let new_table = IndexTable::from_entries(&entries);
    new_table
        .check_duplicates(&format!("generated from {:?}", inputs))
        .into_diagnostic()?;

    let comparison = compare_indexes(&existing_table, &new_table);

    if cli.verbosity > 0 {
        println!(
            "{}",
            serde_json::to_string_pretty(&comparison).into_diagnostic()?
        );
    }

    Ok(comparison.has_differences())
}
