use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use soplint_ast::{NodeType, TreeNode};

use super::RuleContext;
use crate::report::Reporter;

static ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2,}s?\b").expect("valid acronym pattern"));

pub(super) fn check_charter_glossary<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    for term in ctx.glossary.terms() {
        if !ctx.charter.contains(term) {
            reporter.error(format!(
                "Glossary term '{}' is not defined in the charter glossary.",
                term
            ));
        }
    }
}

/// Text runs are scanned one at a time so adjacent blocks never merge into
/// a single token.
pub(super) fn check_undefined_acronyms<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    let mut seen = HashSet::new();

    for text in ctx.document.find_all(NodeType::Str) {
        let Some(literal) = text.literal() else {
            continue;
        };

        for token in ACRONYM.find_iter(literal).map(|m| m.as_str()) {
            if !seen.insert(token.to_string()) {
                continue;
            }
            let defined = ctx.glossary.contains(token)
                || token
                    .strip_suffix('s')
                    .is_some_and(|singular| ctx.glossary.contains(singular));
            if !defined {
                reporter.warning(format!(
                    "Acronym '{}' is not defined in the glossary.",
                    token
                ));
            }
        }
    }
}
