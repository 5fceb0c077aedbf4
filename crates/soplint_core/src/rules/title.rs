use soplint_ast::TreeNode;

use super::RuleContext;
use crate::report::Reporter;

pub(super) fn check_title_format<N: TreeNode>(ctx: &RuleContext<'_, '_, N>, reporter: &mut Reporter) {
    let prefix = &ctx.conventions.title_prefix;
    match ctx.document.title().map(|heading| heading.plain_text()) {
        Some(title) if title.trim().starts_with(prefix.as_str()) => {}
        Some(title) => reporter.error(format!(
            "Title must start with '# {}' followed by the SOP title. Current title: '{}'.",
            prefix,
            title.trim()
        )),
        None => reporter.error(format!(
            "Title must start with '# {}' followed by the SOP title. No level-1 heading was found.",
            prefix
        )),
    }
}

pub(super) fn check_title_matches_file_name<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    // Malformed file names are reported by the file name rule.
    let Some((_, title_part)) = ctx.conventions.split_file_name(ctx.document.path()) else {
        return;
    };

    let expected = format!(
        "{}{}",
        ctx.conventions.title_prefix,
        capitalize(&title_part.replace('-', " "))
    );

    match ctx.document.title().map(|heading| heading.plain_text()) {
        Some(title) if title.trim().to_lowercase() == expected.to_lowercase() => {}
        Some(title) => reporter.error(format!(
            "Title '{}' does not match the file name; expected '{}'.",
            title.trim(),
            expected
        )),
        None => reporter.error(format!(
            "Cannot compare the title with the file name: no level-1 heading was found (expected '# {}').",
            expected
        )),
    }
}

/// First character uppercased, the rest lowercased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
