//! Linter error types.
//!
//! These are the fatal conditions of a run. Authoring problems inside a
//! document are reported as findings, never as errors.

use thiserror::Error;

/// Errors that abort a lint, index or review run.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Repository root or charter document could not be located.
    #[error("Charter error: {0}")]
    Charter(String),

    /// A document lacks structure that the requested operation depends on.
    #[error("Malformed document: {0}")]
    Document(String),

    /// Index generation or comparison failed.
    #[error("Index error: {0}")]
    Index(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a charter lookup error.
    pub fn charter(message: impl Into<String>) -> Self {
        Self::Charter(message.into())
    }

    /// Creates a malformed document error.
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }

    /// Creates an index error.
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }
}
