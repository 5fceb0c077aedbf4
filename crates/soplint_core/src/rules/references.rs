use std::collections::HashMap;

use soplint_ast::{NodeType, TreeNode};
use tracing::debug;

use super::RuleContext;
use crate::references::{LinkTarget, ProbeOutcome, classify, resolve_relative};
use crate::report::Reporter;

pub(super) fn check_references<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    let mut probed: HashMap<&str, ProbeOutcome> = HashMap::new();

    for link in ctx.document.find_all(NodeType::Link) {
        let Some(url) = link.target() else {
            continue;
        };

        match classify(url, &ctx.conventions.remote_hosts) {
            LinkTarget::Relative(path) => {
                let resolved = resolve_relative(ctx.document.path(), path);
                if !resolved.exists() {
                    reporter.error(format!(
                        "Reference '{}' points to '{}', which does not exist.",
                        url,
                        resolved.display()
                    ));
                }
            }
            LinkTarget::Remote(url) => {
                let Some(probe) = ctx.probe else {
                    continue;
                };
                let outcome = probed.entry(url).or_insert_with(|| {
                    debug!("Probing {}", url);
                    probe.probe(url)
                });
                match outcome {
                    ProbeOutcome::Reachable => {}
                    ProbeOutcome::NotFound => reporter.error(format!(
                        "Reference '{}' could not be found (HTTP 404).",
                        url
                    )),
                    ProbeOutcome::Unresolvable(cause) => reporter.error(format!(
                        "Reference '{}' could not be resolved: {}.",
                        url, cause
                    )),
                }
            }
            LinkTarget::Other => {}
        }
    }
}
