use std::sync::LazyLock;

use regex::Regex;
use soplint_ast::TreeNode;

use super::RuleContext;
use crate::metadata::{
    BASE_KEYS, GDI_NODE, INSTANCE_VERSION, MetadataTable, NODE_KEYS, SOP_TYPES, SopType,
    TEMPLATE_SOP_NUMBER, TEMPLATE_SOP_TYPE, TEMPLATE_SOP_VERSION, TOPIC, TOPICS,
    expected_directory, read_metadata,
};
use crate::report::Reporter;
use crate::tables::METADATA_HEADERS;
use crate::version::Version;

static NODE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid node code pattern"));

pub(super) fn check_metadata_table<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    reporter: &mut Reporter,
) {
    let Some(table) = ctx.document.table(METADATA_HEADERS) else {
        reporter.error("Metadata table is missing or incorrectly formatted.");
        return;
    };

    let MetadataTable {
        record,
        malformed_rows,
    } = read_metadata(table);

    for row in &malformed_rows {
        reporter.error(format!(
            "Metadata table row is incorrectly formatted (2 columns are expected): '{}'.",
            row.join(" | ")
        ));
    }

    let sop_type = record.sop_type();
    let has_node_values = NODE_KEYS.iter().any(|key| !record.value(key).is_empty());
    let node_keys_required = sop_type == Some(SopType::NodeSpecific) && has_node_values;

    for (key, value) in record.iter() {
        if NODE_KEYS.contains(&key) {
            if sop_type == Some(SopType::EuropeanLevel) {
                continue;
            }
            if value.is_empty() && !node_keys_required {
                continue;
            }
        }
        check_value(ctx, key, value, reporter);
    }

    for key in BASE_KEYS {
        if !record.contains(key) {
            reporter.error(format!(
                "Metadata row '{}' is missing from the metadata table.",
                key
            ));
        }
    }
    if node_keys_required {
        for key in NODE_KEYS {
            if !record.contains(key) {
                reporter.error(format!(
                    "Metadata row '{}' is missing from the metadata table (required for node-specific SOPs).",
                    key
                ));
            }
        }
    }

    if sop_type == Some(SopType::EuropeanLevel) && has_node_values {
        reporter.error(
            "European-level SOPs should not have 'GDI Node' or 'Instance version' values in the metadata table.",
        );
    }

    if let Some(type_value) = record.get(TEMPLATE_SOP_TYPE) {
        check_directory(ctx, type_value, reporter);
    }
}

fn check_value<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    key: &str,
    value: &str,
    reporter: &mut Reporter,
) {
    let pattern_error = |pattern: &Regex| {
        format!(
            "At the metadata table, value column for '{}' is incorrectly formatted: '{}'. It should follow the regex '{}'.",
            key,
            value,
            pattern.as_str()
        )
    };
    let choice_error = |choices: &[&str]| {
        format!(
            "At the metadata table, value column for '{}' is invalid: '{}'. Its value should be one of: {}.",
            key,
            value,
            choices.join(", ")
        )
    };
    let is_choice = |choices: &[&str]| {
        choices
            .iter()
            .any(|choice| choice.to_lowercase() == value.to_lowercase())
    };

    match key {
        TEMPLATE_SOP_NUMBER if !ctx.conventions.identifier.is_match(value) => {
            reporter.error(pattern_error(&ctx.conventions.identifier));
        }
        GDI_NODE if !NODE_CODE.is_match(value) => {
            reporter.error(pattern_error(&NODE_CODE));
        }
        TEMPLATE_SOP_VERSION | INSTANCE_VERSION if !Version::is_valid(value) => {
            reporter.error(format!(
                "At the metadata table, value column for '{}' is incorrectly formatted: '{}'.",
                key, value
            ));
        }
        TOPIC if !is_choice(TOPICS) => reporter.error(choice_error(TOPICS)),
        TEMPLATE_SOP_TYPE if !is_choice(SOP_TYPES) => reporter.error(choice_error(SOP_TYPES)),
        TEMPLATE_SOP_NUMBER | GDI_NODE | TEMPLATE_SOP_VERSION | INSTANCE_VERSION | TOPIC
        | TEMPLATE_SOP_TYPE => {}
        _ => reporter.warning(format!(
            "Unexpected row in the metadata table: '{} | {}'.",
            key, value
        )),
    }
}

fn check_directory<N: TreeNode>(
    ctx: &RuleContext<'_, '_, N>,
    type_value: &str,
    reporter: &mut Reporter,
) {
    let Some(expected) = expected_directory(type_value) else {
        return;
    };

    let actual = ctx
        .document
        .path()
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    if actual != expected {
        reporter.error(format!(
            "The document is stored in directory '{}', but its type '{}' requires directory '{}'.",
            actual, type_value, expected
        ));
    }
}
