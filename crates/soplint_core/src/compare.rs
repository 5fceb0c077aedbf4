//! Comparison of a committed index with a freshly generated one.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use serde::Serialize;
use soplint_ast::{AstArena, NodeType, TreeNode, TxtNode};
use soplint_parser::{MarkdownParser, Parser};

use crate::LinterError;
use crate::index::{INDEX_COLUMNS, IDENTIFIER_COLUMN, IndexEntry};

/// A table of string cells keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl IndexTable {
    pub fn from_entries(entries: &[IndexEntry]) -> Self {
        Self {
            columns: INDEX_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: entries.iter().map(|e| e.cells().to_vec()).collect(),
        }
    }

    /// Reads the first pipe table of a markdown file.
    pub fn read_markdown(path: &Path) -> Result<Self, LinterError> {
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::file(format!("Failed to read index {}: {}", path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Err(LinterError::index(format!(
                "Index file '{}' is empty",
                path.display()
            )));
        }
        Self::parse_markdown(&content)
            .map_err(|e| LinterError::index(format!("{}: {}", path.display(), e)))
    }

    /// Parses the first table of a markdown document. Cells keep their
    /// markdown source (links stay `[text](target)`) with escaped pipes
    /// unescaped.
    pub fn parse_markdown(content: &str) -> Result<Self, String> {
        let arena = AstArena::new();
        let root = MarkdownParser::new()
            .parse(&arena, content)
            .map_err(|e| e.to_string())?;
        let table = root
            .find_all(NodeType::Table)
            .into_iter()
            .next()
            .ok_or("no markdown table found")?;

        let mut rows = table
            .children
            .iter()
            .filter(|row| row.node_type == NodeType::TableRow)
            .map(|row| {
                row.children
                    .iter()
                    .filter(|cell| cell.node_type == NodeType::TableCell)
                    .map(|cell| cell_source(content, cell))
                    .collect::<Vec<String>>()
            });

        let columns = rows.next().ok_or("no markdown table found")?;
        let rows: Vec<Vec<String>> = rows.collect();

        if !columns.iter().any(|c| c == IDENTIFIER_COLUMN) {
            return Err(format!("the table has no '{}' column", IDENTIFIER_COLUMN));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn identifier(&self, row: &[String]) -> String {
        self.column_index(IDENTIFIER_COLUMN)
            .and_then(|i| row.get(i))
            .cloned()
            .unwrap_or_default()
    }

    fn cell(&self, row: &[String], column: &str) -> String {
        self.column_index(column)
            .and_then(|i| row.get(i))
            .cloned()
            .unwrap_or_default()
    }

    /// Rows keyed by identifier.
    fn by_identifier(&self) -> BTreeMap<String, &Vec<String>> {
        self.rows
            .iter()
            .map(|row| (self.identifier(row), row))
            .collect()
    }

    /// Fails when an identifier appears on more than one row.
    pub fn check_duplicates(&self, source: &str) -> Result<(), LinterError> {
        let mut seen = HashSet::new();
        let mut duplicated = BTreeSet::new();
        for row in &self.rows {
            let identifier = self.identifier(row);
            if !seen.insert(identifier.clone()) {
                duplicated.insert(identifier);
            }
        }

        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(LinterError::index(format!(
                "Duplicate identifiers ({} unique IDs) found in the index table ({}): {:?}",
                duplicated.len(),
                source,
                duplicated
            )))
        }
    }
}

/// Source text spanned by the content of a table cell.
fn cell_source(content: &str, cell: &TxtNode<'_>) -> String {
    let (Some(first), Some(last)) = (cell.children.first(), cell.children.last()) else {
        return String::new();
    };
    content
        .get(first.span.start as usize..last.span.end as usize)
        .unwrap_or_default()
        .trim()
        .replace("\\|", "|")
}

/// Values of one column that differ between the two indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDifference {
    pub existing: String,
    pub new: String,
}

/// One reported difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Difference {
    RowCount(String),
    Missing {
        #[serde(rename = "Identifier")]
        identifier: String,
        #[serde(rename = "Differences")]
        message: String,
    },
    Columns {
        #[serde(rename = "Identifier")]
        identifier: String,
        #[serde(rename = "Differences")]
        columns: BTreeMap<String, ColumnDifference>,
    },
}

/// Outcome of an index comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub num_existing_sops: usize,
    pub num_new_sops: usize,
    pub differences: Vec<Difference>,
}

impl Comparison {
    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty()
    }
}

/// Compares two indexes row by row, matching rows on the identifier.
pub fn compare_indexes(existing: &IndexTable, new: &IndexTable) -> Comparison {
    let mut differences = Vec::new();

    if existing.len() != new.len() {
        differences.push(Difference::RowCount(format!(
            "Number of SOPs differs: existing ({}), new ({})",
            existing.len(),
            new.len()
        )));
    }

    let existing_rows = existing.by_identifier();
    let new_rows = new.by_identifier();

    for identifier in existing_rows.keys().filter(|id| !new_rows.contains_key(*id)) {
        differences.push(Difference::Missing {
            identifier: identifier.clone(),
            message: "Missing from the new index table.".to_string(),
        });
    }
    for identifier in new_rows.keys().filter(|id| !existing_rows.contains_key(*id)) {
        differences.push(Difference::Missing {
            identifier: identifier.clone(),
            message: "Missing from the existing index table.".to_string(),
        });
    }

    for (identifier, existing_row) in &existing_rows {
        let Some(new_row) = new_rows.get(identifier) else {
            continue;
        };

        let columns: BTreeMap<String, ColumnDifference> = existing
            .columns()
            .iter()
            .filter(|column| column.as_str() != IDENTIFIER_COLUMN)
            .filter_map(|column| {
                let old = existing.cell(existing_row, column);
                let current = new.cell(new_row, column);
                (old != current).then(|| {
                    (
                        column.clone(),
                        ColumnDifference {
                            existing: old,
                            new: current,
                        },
                    )
                })
            })
            .collect();

        if !columns.is_empty() {
            differences.push(Difference::Columns {
                identifier: identifier.clone(),
                columns,
            });
        }
    }

    Comparison {
        num_existing_sops: existing.len(),
        num_new_sops: new.len(),
        differences,
    }
}
