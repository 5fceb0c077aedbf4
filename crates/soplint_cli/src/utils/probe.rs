//! Blocking adapter over the async link checker.

use std::time::Duration;

use miette::{IntoDiagnostic, Result};
use soplint_core::{ProbeOutcome, RemoteProbe};
use soplint_remote::LinkChecker;
use tokio::runtime::Runtime;

use super::create_tokio_runtime;

/// Lets the synchronous rule engine wait on remote probes.
pub struct BlockingProbe {
    runtime: Runtime,
    checker: LinkChecker,
}

impl BlockingProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            runtime: create_tokio_runtime()?,
            checker: LinkChecker::new(timeout).into_diagnostic()?,
        })
    }
}

impl RemoteProbe for BlockingProbe {
    fn probe(&self, url: &str) -> ProbeOutcome {
        self.runtime.block_on(self.checker.check(url))
    }
}
