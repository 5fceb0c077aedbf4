//! Error types for remote operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network request failed.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error {status} from {url}")]
    HttpError {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid repository '{0}', expected 'owner/name'")]
    InvalidRepository(String),

    /// Failed to build HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuildError(String),
}
