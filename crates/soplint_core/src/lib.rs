//! # soplint_core
//!
//! Core engine for soplint.
//!
//! This crate provides:
//! - The `Linter` orchestrator and its fourteen document rules
//! - Configuration loading and validation
//! - File discovery and filtering
//! - Index generation and comparison
//! - Review staleness detection
//!
//! ## Example
//!
//! ```rust,ignore
//! use soplint_core::{LintContext, Linter, SopConfig};
//!
//! let config = SopConfig::discover(None, Path::new("."))?;
//! let linter = Linter::new(config)?;
//!
//! let mut ctx = LintContext::new(&paths, linter.config());
//! let report = linter.lint_files(&mut ctx)?;
//! for (path, findings) in report.iter() {
//!     println!("{}: {} errors", path, findings.errors.len());
//! }
//! ```

mod charter;
pub mod compare;
mod config;
pub mod conventions;
pub mod document;
mod error;
pub mod file_finder;
mod glossary;
pub mod history;
pub mod index;
mod linter;
pub mod metadata;
pub mod references;
mod report;
pub mod review;
pub mod rules;
pub mod tables;
mod version;

pub use charter::CharterCache;
pub use compare::{Comparison, Difference, IndexTable, compare_indexes};
pub use config::{CONFIG_FILE_NAME, SopConfig};
pub use conventions::Conventions;
pub use error::LinterError;
pub use file_finder::FileFinder;
pub use glossary::{Glossary, parse_glossary};
pub use index::{IndexEntry, IndexFormat, IndexGenerator};
pub use linter::{LintContext, Linter};
pub use references::{ProbeOutcome, RemoteProbe};
pub use report::{Findings, LintReport, Reporter, Severity};
pub use review::{FileReview, OpenIssue, ReviewReport};
pub use rules::Rule;
pub use version::{InvalidVersion, Version};

#[cfg(test)]
pub mod test_utils;
