//! Procedure step checks.
//!
//! Steps are headings under the procedure section numbered `8.<n>`, with
//! nested steps `8.<n>.<m>`. Each step is followed by a table whose first
//! body cell repeats the step number without the leading `8.`.

use std::sync::LazyLock;

use regex::Regex;
use soplint_ast::{NodeType, TreeNode};

use super::RuleContext;
use crate::report::Reporter;

/// Depth of top-level step headings.
pub(crate) const STEP_HEADING_DEPTH: u8 = 4;

pub(crate) static STEP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^8\.(\d+)").expect("valid step number pattern"));

static STEP_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^8\.(\d+(?:\.\d+)*)").expect("valid step path pattern"));

pub(super) fn check_step_numbering<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    let Some(section) = ctx.document.procedure() else {
        return;
    };

    let mut expected: u64 = 1;
    for heading in section
        .iter()
        .filter(|node| node.heading_depth() == Some(STEP_HEADING_DEPTH))
    {
        let text = heading.plain_text();
        let text = text.trim();
        let number = STEP_NUMBER
            .captures(text)
            .and_then(|captures| captures[1].parse::<u64>().ok());

        match number {
            Some(found) if found == expected => expected = expected.saturating_add(1),
            Some(found) => {
                reporter.error(format!(
                    "Procedure step '{}' is numbered 8.{} but 8.{} was expected.",
                    text, found, expected
                ));
                expected = found.saturating_add(1);
            }
            None => reporter.error(format!(
                "Procedure step header '{}' does not start with a step number (expected '8.{}').",
                text, expected
            )),
        }
    }
}

pub(super) fn check_step_tables<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    let Some(section) = ctx.document.procedure() else {
        return;
    };

    for (index, node) in section.iter().enumerate() {
        if node.heading_depth().is_none() {
            continue;
        }
        let text = node.plain_text();
        let Some(captures) = STEP_PATH.captures(text.trim()) else {
            continue;
        };
        let step = &captures[1];

        let table = section[index + 1..]
            .iter()
            .take_while(|sibling| sibling.heading_depth().is_none())
            .find(|sibling| sibling.kind() == NodeType::Table);

        let Some(table) = table else {
            reporter.error(format!(
                "Procedure step 8.{} is not followed by a step table.",
                step
            ));
            continue;
        };

        let rows = table.table_rows();
        match rows.get(1).and_then(|row| row.first()) {
            Some(cell) if cell.trim_matches('`').trim() == step => {}
            Some(cell) => reporter.error(format!(
                "The table of procedure step 8.{} starts with '{}' instead of '{}'.",
                step, cell, step
            )),
            None => reporter.error(format!(
                "The table of procedure step 8.{} has no body rows.",
                step
            )),
        }
    }
}
