//! Network access for soplint.
//!
//! - [`LinkChecker`] confirms that remote references resolve.
//! - [`GitHubClient`] lists and opens review reminder issues.

pub mod error;
pub mod github;
pub mod link_checker;

pub use error::RemoteError;
pub use github::{GITHUB_API_URL, GitHubClient};
pub use link_checker::{DEFAULT_TIMEOUT, LinkChecker};
