//! Shared fixtures for unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use soplint_ast::{AstArena, NodeType, Span, TxtNode};
use soplint_parser::{MarkdownParser, Parser};
use tempfile::TempDir;

/// File name of [`CONFORMING_SOP`].
pub const CONFORMING_NAME: &str = "GDI-SOP0001_data-access-request.md";

/// Directory [`CONFORMING_SOP`] has to live in.
pub const CONFORMING_DIR: &str = "european-level";

/// A document that passes every rule.
pub const CONFORMING_SOP: &str = "\
# European GDI - Data access request

| Metadata | Value |
|----------|-------|
| Template SOP number | GDI-SOP0001 |
| Template SOP version | v1.1 |
| Topic | Data & metadata management |
| Template SOP type | European-level SOP |
| GDI Node | |
| Instance version | |

## Index

- [Document History](#document-history)
- [Procedure](#procedure)

### Document History

| Template Version | Instance version | Author(s) | Description of changes | Date |
|------------------|------------------|-----------|------------------------|------|
| v1.1 | | Jane Doe | Clarified the scope | 2024.05.01 |
| v1.0 | | John Roe | Initial version | 2024.01.15 |

### Glossary

| Term | Definition |
|------|------------|
| GDI | Genomic Data Infrastructure |
| SOP | Standard Operating Procedure |

### Roles and Responsibilities

| Role | Full name | GDI/node role | Organisation |
|------|-----------|---------------|--------------|
| Author | Jane Doe | Data steward | Example Org |
| Reviewer | John Roe | Node coordinator | Example Org |
| Approver | Ann Poe | Node lead | Example Org |

### Purpose

This SOP describes how an access request is handled.

### Scope

It applies to every node of the GDI.

### Procedure

![Overview](./images/overview.png)

#### 8.1 Receive the request

| Step | Action | Responsible |
|------|--------|-------------|
| 1 | Record the request in the tracker. | Data steward |

#### 8.2 Assess the request

| Step | Action | Responsible |
|------|--------|-------------|
| 2 | Check the request against the [charter](../docs/GDI-SOP_charter.md). | Node coordinator |

### References

- [Project website](https://example.org/gdi)
";

/// Charter whose glossary covers [`CONFORMING_SOP`].
pub const CHARTER: &str = "\
# European GDI - SOP charter

### Glossary

| Term | Definition |
|------|------------|
| GDI | Genomic Data Infrastructure |
| SOP | Standard Operating Procedure |
| ELSI | Ethical, legal and social implications |
";

/// Parses `source` and hands the root to `f`.
pub fn with_tree<R>(source: &str, f: impl FnOnce(&TxtNode<'_>) -> R) -> R {
    let arena = AstArena::new();
    let root = MarkdownParser::new()
        .parse(&arena, source)
        .expect("fixture should parse");
    f(&root)
}

/// Builds a document holding a single table, first row as header.
///
/// Unlike markdown input, rows keep exactly the cells given, which makes
/// malformed rows easy to express.
pub fn table_tree<'a>(arena: &'a AstArena, rows: &[&[&str]]) -> TxtNode<'a> {
    let span = Span::new(0, 0);
    let rows: Vec<TxtNode<'a>> = rows
        .iter()
        .map(|cells| {
            let cells: Vec<TxtNode<'a>> = cells
                .iter()
                .map(|text| {
                    let text = TxtNode::new_text(NodeType::Str, span, arena.alloc_str(text));
                    TxtNode::new_parent(NodeType::TableCell, span, arena.alloc_slice_copy(&[text]))
                })
                .collect();
            TxtNode::new_parent(NodeType::TableRow, span, arena.alloc_slice_copy(&cells))
        })
        .collect();
    let table = TxtNode::new_parent(NodeType::Table, span, arena.alloc_slice_copy(&rows));
    TxtNode::new_parent(NodeType::Document, span, arena.alloc_slice_copy(&[table]))
}

/// A temporary repository with a root marker and a charter.
pub struct FixtureRepo {
    dir: TempDir,
}

impl FixtureRepo {
    pub fn new() -> Self {
        let repo = Self::without_charter();
        repo.write("docs/GDI-SOP_charter.md", CHARTER);
        repo
    }

    pub fn without_charter() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join(".git")).expect("create .git");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, content).expect("write fixture");
        path
    }

    /// Writes the conforming document to its expected location, plus its image.
    pub fn write_conforming(&self) -> PathBuf {
        self.write(&format!("{CONFORMING_DIR}/images/overview.png"), "png");
        self.write(&format!("{CONFORMING_DIR}/{CONFORMING_NAME}"), CONFORMING_SOP)
    }
}
