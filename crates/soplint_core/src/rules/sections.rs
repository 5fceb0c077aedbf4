use soplint_ast::TreeNode;

use super::RuleContext;
use crate::report::Reporter;

pub(super) fn check_required_sections<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    for section in &ctx.conventions.required_sections {
        if ctx.document.section(&section.locator).is_none() {
            reporter.error(format!("Required section '{}' is missing.", section.label));
        }
    }
}

pub(super) fn check_non_empty_sections<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    for section in &ctx.conventions.required_sections {
        let Some(content) = ctx.document.section(&section.locator) else {
            continue;
        };

        if content.iter().all(|node| node.plain_text().trim().is_empty()) {
            reporter.error(format!("The section '{}' is empty.", section.label));
        }
    }
}
