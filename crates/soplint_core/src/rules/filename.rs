use soplint_ast::TreeNode;

use super::RuleContext;
use crate::report::Reporter;

pub(super) fn check_file_name<N: TreeNode>(ctx: &RuleContext<'_, '_, N>, reporter: &mut Reporter) {
    let path = ctx.document.path();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let Some((identifier, title)) = ctx.conventions.split_file_name(path) else {
        reporter.error(format!(
            "File name '{}' does not follow the '<identifier>_<title>.md' convention (e.g. 'GDI-SOP0001_my-title.md').",
            name
        ));
        return;
    };

    if title != title.to_lowercase() {
        reporter.error(format!(
            "The title part of the file name '{}' must be lowercase.",
            name
        ));
    }

    let uses = ctx
        .inputs
        .iter()
        .filter(|input| ctx.conventions.file_identifier(input) == Some(identifier))
        .count();
    if uses > 1 {
        reporter.error(format!(
            "Identifier '{}' is used by {} input files; identifiers must be unique.",
            identifier, uses
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::rules::Rule;
    use crate::rules::testing::{RuleRun, run_rule};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_file_name() {
        assert!(run_rule(Rule::FileName, "a/GDI-SOP0001_data-access.md", "").is_empty());
    }

    #[test]
    fn test_uppercase_title_part() {
        let findings = run_rule(Rule::FileName, "GDI-SOP0001_Data-Access.md", "");
        assert_eq!(
            findings.errors,
            vec!["The title part of the file name 'GDI-SOP0001_Data-Access.md' must be lowercase."]
        );
    }

    #[test]
    fn test_malformed_file_name() {
        let findings = run_rule(Rule::FileName, "GDI-SOP1_data.md", "");
        assert_eq!(findings.errors.len(), 1);
        assert!(findings.errors[0].starts_with("File name 'GDI-SOP1_data.md' does not follow"));
    }

    #[test]
    fn test_duplicate_identifier_is_reported_for_each_file() {
        let inputs = vec![
            PathBuf::from("a/GDI-SOP0002_first.md"),
            PathBuf::from("b/GDI-SOP0002_second.md"),
            PathBuf::from("b/GDI-SOP0003_third.md"),
        ];

        for (path, expected) in [(&inputs[0], 1), (&inputs[1], 1), (&inputs[2], 0)] {
            let mut run = RuleRun::at(Path::new(path));
            run.inputs = inputs.clone();
            let findings = run.run(Rule::FileName, "");
            assert_eq!(findings.errors.len(), expected, "{}: {:?}", path.display(), findings);
        }
    }
}
