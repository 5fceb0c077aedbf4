//! Locating tables by their header signature.
//!
//! SOP documents have several tables with fixed roles (metadata, history,
//! roles, glossary). A table's role is identified by its header row alone.

use soplint_ast::{NodeType, TreeNode};

/// Header of the metadata table.
pub const METADATA_HEADERS: &[&str] = &["Metadata", "Value"];

/// Header of the document history table.
pub const HISTORY_HEADERS: &[&str] = &[
    "Template Version",
    "Instance version",
    "Author(s)",
    "Description of changes",
    "Date",
];

/// Header of the roles and responsibilities table.
pub const ROLES_HEADERS: &[&str] = &["Role", "Full name", "GDI/node role", "Organisation"];

/// Header of the glossary table.
pub const GLOSSARY_HEADERS: &[&str] = &["Term", "Definition"];

/// Returns true if `header` equals `signature` case-insensitively, with the
/// same number of columns in the same order.
pub fn header_matches(header: &[String], signature: &[&str]) -> bool {
    header.len() == signature.len()
        && header
            .iter()
            .zip(signature)
            .all(|(cell, expected)| cell.to_lowercase() == expected.to_lowercase())
}

/// All tables under `root` whose header row matches `signature`.
pub fn find_tables<'n, N: TreeNode>(root: &'n N, signature: &[&str]) -> Vec<&'n N> {
    let tables = root.find_all(NodeType::Table);
    find_tables_in(&tables, signature)
}

/// Same as [`find_tables`] over an already extracted list of tables.
pub fn find_tables_in<'n, N: TreeNode>(tables: &[&'n N], signature: &[&str]) -> Vec<&'n N> {
    tables
        .iter()
        .copied()
        .filter(|table| {
            table
                .table_rows()
                .first()
                .is_some_and(|header| header_matches(header, signature))
        })
        .collect()
}

/// Body rows (every row after the header) of a table.
pub fn body_rows<N: TreeNode>(table: &N) -> Vec<Vec<String>> {
    table.table_rows().into_iter().skip(1).collect()
}
