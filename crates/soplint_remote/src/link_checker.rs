//! Remote reference probing.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use soplint_core::ProbeOutcome;
use tracing::debug;

use crate::error::RemoteError;

/// Default timeout for a single probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Probes remote URLs with `HEAD`, falling back to `GET` for servers that
/// refuse `HEAD`.
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: Client,
}

impl LinkChecker {
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("soplint/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::ClientBuildError(e.to_string()))?;
        Ok(Self { client })
    }

    /// Probes `url`. Only a 404 counts as missing; any other failure is
    /// reported as unresolvable with its cause.
    pub async fn check(&self, url: &str) -> ProbeOutcome {
        debug!("Probing {}", url);
        let status = match self.status_of(url).await {
            Ok(status) => status,
            Err(e) => return ProbeOutcome::Unresolvable(e.to_string()),
        };

        if status.is_success() {
            ProbeOutcome::Reachable
        } else if status == StatusCode::NOT_FOUND {
            ProbeOutcome::NotFound
        } else {
            ProbeOutcome::Unresolvable(format!("HTTP status {}", status))
        }
    }

    async fn status_of(&self, url: &str) -> Result<StatusCode, RemoteError> {
        let status = self.client.head(url).send().await?.status();
        if matches!(
            status,
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
        ) {
            debug!("HEAD refused by {}, retrying with GET", url);
            return Ok(self.client.get(url).send().await?.status());
        }
        Ok(status)
    }
}
