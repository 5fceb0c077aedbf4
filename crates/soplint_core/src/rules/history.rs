use soplint_ast::TreeNode;

use super::RuleContext;
use crate::history::{DATE_PATTERN, history_rows};
use crate::report::Reporter;
use crate::tables::HISTORY_HEADERS;
use crate::version::Version;

/// Versions of the last row whose versions were valid.
struct PreviousRow {
    template: Version,
    instance: Option<Version>,
}

/// Rows run newest to oldest: template versions never increase downwards,
/// and instance versions strictly decrease.
pub(super) fn check_document_history<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    let Some(table) = ctx.document.table(HISTORY_HEADERS) else {
        reporter.error("Document History table is missing or incorrectly formatted.");
        return;
    };

    let mut previous: Option<PreviousRow> = None;

    for row in history_rows(table) {
        let row_text = row.join(" | ");
        let [template, instance, author, description, date] = row.as_slice() else {
            reporter.error(format!(
                "Document History table row is incorrectly formatted (expected 5 columns). Row: '{}'.",
                row_text
            ));
            continue;
        };

        let template_version = Version::parse(template).ok();
        if template_version.is_none() {
            reporter.error(format!(
                "At the Document History table, Template Version ('{}') is incorrectly formatted. Row: '{}'.",
                template, row_text
            ));
        }

        let instance_version = if instance.is_empty() {
            Some(None)
        } else {
            match Version::parse(instance) {
                Ok(version) => Some(Some(version)),
                Err(_) => {
                    reporter.error(format!(
                        "At the Document History table, Instance Version ('{}') is incorrectly formatted. Row: '{}'.",
                        instance, row_text
                    ));
                    None
                }
            }
        };

        if let (Some(template), Some(instance)) = (template_version, instance_version) {
            if let Some(prev) = &previous {
                check_order(prev, &template, instance.as_ref(), &row_text, reporter);
            }
            previous = Some(PreviousRow { template, instance });
        }

        if author.is_empty() {
            reporter.error(format!("Author name is missing. Row: '{}'.", row_text));
        }
        if description.is_empty() {
            reporter.error(format!(
                "Description of changes is missing. Row: '{}'.",
                row_text
            ));
        }
        if !DATE_PATTERN.is_match(date) {
            reporter.error(format!(
                "Date is incorrectly formatted (expected format is YYYY.MM.DD): '{}'. Row: '{}'.",
                date, row_text
            ));
        }
    }
}

fn check_order(
    prev: &PreviousRow,
    template: &Version,
    instance: Option<&Version>,
    row_text: &str,
    reporter: &mut Reporter,
) {
    // Equal template versions are only allowed between instance revisions.
    if *template > prev.template || (*template == prev.template && prev.instance.is_none()) {
        reporter.error(format!(
            "At the Document History table, Template version ('{}') should be lower than the version right above ('{}'). \
             Rows are ordered from recent (top) to older (bottom). Row: '{}'.",
            template, prev.template, row_text
        ));
    }

    if let (Some(current), Some(above)) = (instance, prev.instance.as_ref()) {
        if current >= above {
            reporter.error(format!(
                "At the Document History table, Instance Version ('{}') should be lower than the version right above ('{}'). \
                 Rows are ordered from recent (top) to older (bottom). Row: '{}'.",
                current, above, row_text
            ));
        }
    }
}
