//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use soplint_core::IndexFormat;
use soplint_remote::GITHUB_API_URL;

/// soplint - Linter and index tools for SOP documents
#[derive(Parser)]
#[command(name = "soplint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: 0 prints nothing, 1 the final report, 2 also per-file progress
    #[arg(
        short,
        long,
        global = true,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint SOP files
    Lint {
        /// SOP files, or directories to search for SOP files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Treat warnings as errors
        #[arg(short, long)]
        strict: bool,

        /// Skip probing of remote links
        #[arg(long)]
        no_remote: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Generate the SOP index table
    Index {
        /// SOP files, or directories to search for SOP files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format (markdown, csv, json)
        #[arg(short, long, default_value = "markdown")]
        format: IndexFormat,

        /// Write to a new file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare an existing index with one generated from the inputs
    CompareIndex {
        /// Existing markdown index
        existing: PathBuf,

        /// SOP files, or directories to search for SOP files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Report SOPs due for periodic review
    Review {
        /// SOP files, or directories to search for SOP files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Days since the last edit after which a review is due
        #[arg(long)]
        days_review: Option<i64>,

        /// Open a reminder issue for every due SOP without one
        #[arg(long)]
        create_issues: bool,

        /// Repository (owner/name) holding the reminder issues
        #[arg(short, long)]
        repository: Option<String>,

        #[arg(long, hide = true, default_value = GITHUB_API_URL)]
        api_url: String,
    },
}

/// Output format of the lint report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
