//! Index table generation.
//!
//! One row per document, built from its metadata table, procedure steps and
//! document history, sorted by identifier.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use soplint_ast::{AstArena, TreeNode};
use soplint_parser::{MarkdownParser, Parser};
use tracing::debug;

use crate::LinterError;
use crate::document::SopDocument;
use crate::history::last_modified;
use crate::metadata::{
    GDI_NODE, INSTANCE_VERSION, TEMPLATE_SOP_NUMBER, TEMPLATE_SOP_TYPE, TEMPLATE_SOP_VERSION,
    TOPIC, read_metadata,
};
use crate::rules::procedure::{STEP_HEADING_DEPTH, STEP_NUMBER};
use crate::tables::METADATA_HEADERS;

/// Column headers, in output order.
pub const INDEX_COLUMNS: [&str; 9] = [
    "Name",
    "Identifier",
    "Template version",
    "Topic",
    "Type",
    "GDI Node",
    "Instance version",
    "Nº steps",
    "Last modified",
];

/// Column holding the key used to match rows between two indexes.
pub const IDENTIFIER_COLUMN: &str = "Identifier";

/// One row of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Identifier")]
    pub identifier: String,
    #[serde(rename = "Template version")]
    pub template_version: String,
    #[serde(rename = "Topic")]
    pub topic: String,
    #[serde(rename = "Type")]
    pub sop_type: String,
    #[serde(rename = "GDI Node")]
    pub gdi_node: String,
    #[serde(rename = "Instance version")]
    pub instance_version: String,
    #[serde(rename = "Nº steps")]
    pub steps: usize,
    #[serde(rename = "Last modified")]
    pub last_modified: String,
}

impl IndexEntry {
    /// Cell texts in [`INDEX_COLUMNS`] order.
    pub fn cells(&self) -> [String; 9] {
        [
            self.name.clone(),
            self.identifier.clone(),
            self.template_version.clone(),
            self.topic.clone(),
            self.sop_type.clone(),
            self.gdi_node.clone(),
            self.instance_version.clone(),
            self.steps.to_string(),
            self.last_modified.clone(),
        ]
    }
}

/// Output format of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexFormat {
    #[default]
    Markdown,
    Csv,
    Json,
}

impl FromStr for IndexFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown index format: {}", s)),
        }
    }
}

/// Number of top-level procedure steps (`#### 8.N ...` headings).
pub fn count_procedure_steps<N: TreeNode>(document: &SopDocument<'_, N>) -> usize {
    document.procedure().map_or(0, |section| {
        section
            .iter()
            .filter(|node| node.heading_depth() == Some(STEP_HEADING_DEPTH))
            .filter(|node| STEP_NUMBER.is_match(node.plain_text().trim()))
            .count()
    })
}

/// Markdown link to a document, labelled with its file stem.
pub fn document_link(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("[{}]({})", stem, path.display())
}

/// Builds index entries from SOP documents.
#[derive(Debug, Default)]
pub struct IndexGenerator {
    parser: MarkdownParser,
}

impl IndexGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses a single document.
    pub fn parse_sop(&self, path: &Path) -> Result<IndexEntry, LinterError> {
        debug!("Indexing {}", path.display());
        let source = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

        let arena = AstArena::new();
        let root = self
            .parser
            .parse(&arena, &source)
            .map_err(|e| LinterError::parse(format!("{}: {}", path.display(), e)))?;

        Self::entry_for(path, &root)
    }

    /// Builds the entry of an already parsed document.
    ///
    /// A missing metadata table, a malformed metadata row or a missing
    /// history table is an error, not an empty cell.
    pub fn entry_for<N: TreeNode>(path: &Path, root: &N) -> Result<IndexEntry, LinterError> {
        let label = path.display().to_string();
        let document = SopDocument::new(path, root);

        let table = document.table(METADATA_HEADERS).ok_or_else(|| {
            LinterError::document(format!(
                "Metadata table with headers {:?} is missing from '{}'",
                METADATA_HEADERS, label
            ))
        })?;
        let metadata = read_metadata(table);
        if let Some(row) = metadata.malformed_rows.first() {
            return Err(LinterError::document(format!(
                "Metadata table row of '{}' is incorrectly formatted (expected 2 columns): '{}'",
                label,
                row.join(" | ")
            )));
        }
        let record = metadata.record;

        Ok(IndexEntry {
            name: document_link(path),
            identifier: record.value(TEMPLATE_SOP_NUMBER).to_string(),
            template_version: record.value(TEMPLATE_SOP_VERSION).to_string(),
            topic: record.value(TOPIC).to_string(),
            sop_type: record.value(TEMPLATE_SOP_TYPE).to_string(),
            gdi_node: record.value(GDI_NODE).to_string(),
            instance_version: record.value(INSTANCE_VERSION).to_string(),
            steps: count_procedure_steps(&document),
            last_modified: last_modified(root, &label)?,
        })
    }

    /// Entries for every path, sorted by identifier.
    pub fn parse_all(&self, paths: &[PathBuf]) -> Result<Vec<IndexEntry>, LinterError> {
        if paths.is_empty() {
            return Err(LinterError::index(
                "No SOP documents were given; the index would be empty",
            ));
        }

        let mut entries = paths
            .iter()
            .map(|path| self.parse_sop(path))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(entries)
    }
}

/// Renders entries in the requested format.
pub fn render(entries: &[IndexEntry], format: IndexFormat) -> Result<String, LinterError> {
    match format {
        IndexFormat::Markdown => Ok(render_markdown(entries)),
        IndexFormat::Csv => render_csv(entries),
        IndexFormat::Json => serde_json::to_string_pretty(entries)
            .map_err(|e| LinterError::index(format!("Failed to serialize index: {}", e))),
    }
}

/// Pipe table with padded columns; the step count is right-aligned.
fn render_markdown(entries: &[IndexEntry]) -> String {
    let rows: Vec<[String; 9]> = entries.iter().map(IndexEntry::cells).collect();
    let widths: Vec<usize> = INDEX_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(3)
        })
        .collect();
    let numeric = |i: usize| INDEX_COLUMNS[i] == "Nº steps";

    let format_row = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if numeric(i) {
                    format!("{:>width$}", cell, width = widths[i])
                } else {
                    format!("{:<width$}", cell, width = widths[i])
                }
            })
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let header: Vec<String> = INDEX_COLUMNS.iter().map(|h| h.to_string()).collect();
    let separator: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            if numeric(i) {
                format!("{}:", "-".repeat(width + 1))
            } else {
                format!(":{}", "-".repeat(width + 1))
            }
        })
        .collect();

    let mut lines = vec![format_row(&header), format!("|{}|", separator.join("|"))];
    lines.extend(rows.iter().map(|row| format_row(row)));
    lines.join("\n") + "\n"
}

fn render_csv(entries: &[IndexEntry]) -> Result<String, LinterError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(INDEX_COLUMNS)
        .map_err(|e| LinterError::index(format!("Failed to write CSV: {}", e)))?;
    for entry in entries {
        writer
            .write_record(entry.cells())
            .map_err(|e| LinterError::index(format!("Failed to write CSV: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LinterError::index(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| LinterError::index(format!("Invalid CSV output: {}", e)))
}

/// Writes `content` to a file that must not exist yet.
pub fn write_new_file(path: &Path, content: &str) -> Result<(), LinterError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => LinterError::index(format!(
                "Output file '{}' already exists and will not be overwritten",
                path.display()
            )),
            _ => LinterError::file(format!("Failed to create {}: {}", path.display(), e)),
        })?;

    file.write_all(content.as_bytes())?;
    Ok(())
}
