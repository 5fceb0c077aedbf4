//! Reference classification and resolution.
//!
//! Relative links are checked against the file system. Links to designated
//! remote hosts are handed to a [`RemoteProbe`]; every other link is left
//! alone.

use std::path::{Path, PathBuf};

/// Result of probing a remote reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    NotFound,
    /// The target could not be confirmed; carries the cause.
    Unresolvable(String),
}

/// Checks whether a remote URL resolves.
///
/// Implementations block until the outcome is known.
pub trait RemoteProbe {
    fn probe(&self, url: &str) -> ProbeOutcome;
}

/// What a link target refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'u> {
    /// A path relative to the document, fragment removed.
    Relative(&'u str),
    /// A URL on one of the designated remote hosts.
    Remote(&'u str),
    Other,
}

/// Classifies a link target.
pub fn classify<'u>(url: &'u str, remote_hosts: &[String]) -> LinkTarget<'u> {
    if url.starts_with("./") || url.starts_with("../") {
        let path = url.split(['#', '?']).next().unwrap_or(url);
        return LinkTarget::Relative(path);
    }

    match url::Url::parse(url) {
        Ok(parsed)
            if matches!(parsed.scheme(), "http" | "https")
                && parsed
                    .host_str()
                    .is_some_and(|host| is_designated(host, remote_hosts)) =>
        {
            LinkTarget::Remote(url)
        }
        _ => LinkTarget::Other,
    }
}

fn is_designated(host: &str, remote_hosts: &[String]) -> bool {
    remote_hosts.iter().any(|designated| {
        host.eq_ignore_ascii_case(designated)
            || host
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", designated.to_ascii_lowercase()))
    })
}

/// Resolves a relative target against the directory of `document`.
pub fn resolve_relative(document: &Path, target: &str) -> PathBuf {
    document
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(target)
}
