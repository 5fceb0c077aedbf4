//! Document history table extraction.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use soplint_ast::TreeNode;

use crate::LinterError;
use crate::tables::{HISTORY_HEADERS, body_rows, find_tables};

/// Values starting with `YYYY.MM.DD`.
pub static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\.\d{2}\.\d{2}").expect("valid date pattern"));

const DATE_FORMAT: &str = "%Y.%m.%d";

/// Body rows of a history table with surrounding backticks stripped from
/// every cell.
pub fn history_rows<N: TreeNode>(table: &N) -> Vec<Vec<String>> {
    body_rows(table)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.trim_matches('`').trim().to_string())
                .collect()
        })
        .collect()
}

/// Removes inline formatting characters (`` ` ``, `*`, `_`) from a cell.
pub fn strip_formatting(cell: &str) -> String {
    cell.chars()
        .filter(|c| !matches!(c, '`' | '*' | '_'))
        .collect()
}

/// Parses a value that is exactly a `YYYY.MM.DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if !DATE_PATTERN.find(raw).is_some_and(|m| m.end() == raw.len()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Date cell of the newest (first) history row, formatting stripped.
pub fn last_modified<N: TreeNode>(root: &N, label: &str) -> Result<String, LinterError> {
    let row = newest_row(root, label)?;
    Ok(strip_formatting(&row[4]))
}

/// Date of the newest (first) history row.
pub fn most_recent_date<N: TreeNode>(root: &N, label: &str) -> Result<NaiveDate, LinterError> {
    let row = newest_row(root, label)?;
    let raw = row[4].as_str();
    parse_date(raw).ok_or_else(|| {
        LinterError::document(format!(
            "Invalid date '{}' in the Document History table of '{}'",
            raw, label
        ))
    })
}

fn newest_row<N: TreeNode>(root: &N, label: &str) -> Result<Vec<String>, LinterError> {
    let table = find_tables(root, HISTORY_HEADERS)
        .into_iter()
        .next()
        .ok_or_else(|| {
            LinterError::document(format!(
                "No Document History table with headers {:?} in '{}'",
                HISTORY_HEADERS, label
            ))
        })?;

    let row = history_rows(table).into_iter().next().ok_or_else(|| {
        LinterError::document(format!("Document History table of '{}' has no rows", label))
    })?;

    if row.len() != HISTORY_HEADERS.len() {
        return Err(LinterError::document(format!(
            "First Document History row of '{}' has {} cells, expected {}",
            label,
            row.len(),
            HISTORY_HEADERS.len()
        )));
    }

    Ok(row)
}
