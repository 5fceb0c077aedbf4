//! CLI utility functions

mod probe;

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use soplint_core::{FileFinder, SopConfig};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::cli::Cli;

pub use probe::BlockingProbe;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads `--config`, or `.soplint.json` from the working directory.
pub fn load_config(cli: &Cli) -> Result<SopConfig> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    SopConfig::discover(cli.config.as_deref(), &cwd).into_diagnostic()
}

/// Expands the inputs into the list of SOP files.
pub fn collect_inputs(config: &SopConfig, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let finder = FileFinder::new(&config.identifier_prefix, &config.exclude).into_diagnostic()?;
    let files = finder.collect(inputs);
    if files.is_empty() {
        warn!("No SOP files found in {:?}", inputs);
    }
    debug!("SOP files: {:?}", files);
    Ok(files)
}
