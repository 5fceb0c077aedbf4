//! Structural view over a parsed SOP document.

use std::path::Path;

use soplint_ast::{NodeType, TreeNode, section_range};

use crate::tables::find_tables_in;

/// Locates a section heading by level and contained text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLocator {
    pub depth: u8,
    pub text: &'static str,
}

impl SectionLocator {
    pub const fn new(depth: u8, text: &'static str) -> Self {
        Self { depth, text }
    }

    /// Returns true if `node` is a heading of this level containing the text.
    pub fn matches<N: TreeNode>(&self, node: &N) -> bool {
        node.heading_depth() == Some(self.depth) && node.plain_text().contains(self.text)
    }
}

/// A section every document must have, with the label used in findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredSection {
    pub label: &'static str,
    pub locator: SectionLocator,
}

/// The procedure section heading.
pub const PROCEDURE: SectionLocator = SectionLocator::new(3, "Procedure");

/// Sections checked for presence and content, in reporting order.
pub const REQUIRED_SECTIONS: &[RequiredSection] = &[
    RequiredSection {
        label: "## Index",
        locator: SectionLocator::new(2, "Index"),
    },
    RequiredSection {
        label: "### Document History",
        locator: SectionLocator::new(3, "Document History"),
    },
    RequiredSection {
        label: "### Glossary",
        locator: SectionLocator::new(3, "Glossary"),
    },
    RequiredSection {
        label: "### Roles and Responsibilities",
        locator: SectionLocator::new(3, "Roles and Responsibilities"),
    },
    RequiredSection {
        label: "### Purpose",
        locator: SectionLocator::new(3, "Purpose"),
    },
    RequiredSection {
        label: "### Scope",
        locator: SectionLocator::new(3, "Scope"),
    },
    RequiredSection {
        label: "### Procedure",
        locator: PROCEDURE,
    },
    RequiredSection {
        label: "### References",
        locator: SectionLocator::new(3, "References"),
    },
];

/// A parsed document together with lookups shared by the rules.
///
/// The table list is extracted once on construction.
pub struct SopDocument<'d, N: TreeNode> {
    path: &'d Path,
    root: &'d N,
    tables: Vec<&'d N>,
}

impl<'d, N: TreeNode> SopDocument<'d, N> {
    pub fn new(path: &'d Path, root: &'d N) -> Self {
        Self {
            path,
            root,
            tables: root.find_all(NodeType::Table),
        }
    }

    pub fn path(&self) -> &'d Path {
        self.path
    }

    pub fn root(&self) -> &'d N {
        self.root
    }

    /// First table whose header matches `signature`.
    pub fn table(&self, signature: &[&str]) -> Option<&'d N> {
        find_tables_in(&self.tables, signature).into_iter().next()
    }

    /// First level-1 heading.
    pub fn title(&self) -> Option<&'d N> {
        self.root
            .find_all(NodeType::Header)
            .into_iter()
            .find(|heading| heading.heading_depth() == Some(1))
    }

    /// All descendants of a kind, in document order.
    pub fn find_all(&self, kind: NodeType) -> Vec<&'d N> {
        self.root.find_all(kind)
    }

    /// Siblings following the first heading matched by `locator`, up to the
    /// next heading of the same or a higher level.
    pub fn section(&self, locator: &SectionLocator) -> Option<&'d [N]> {
        let (siblings, index) = locate(self.root, locator)?;
        Some(&siblings[section_range(siblings, index)])
    }

    /// Contents of the procedure section.
    pub fn procedure(&self) -> Option<&'d [N]> {
        self.section(&PROCEDURE)
    }
}

fn locate<'n, N: TreeNode>(
    parent: &'n N,
    locator: &SectionLocator,
) -> Option<(&'n [N], usize)> {
    let siblings = parent.children();
    for (index, child) in siblings.iter().enumerate() {
        if locator.matches(child) {
            return Some((siblings, index));
        }
        if let Some(found) = locate(child, locator) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::METADATA_HEADERS;
    use crate::test_utils::{CONFORMING_SOP, with_tree};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_procedure_section_stops_at_next_h3() {
        with_tree(CONFORMING_SOP, |root| {
            let document = SopDocument::new(Path::new("doc.md"), root);
            let procedure = document.procedure().unwrap();

            let headings: Vec<String> = procedure
                .iter()
                .filter(|node| node.heading_depth().is_some())
                .map(|node| node.plain_text())
                .collect();
            assert_eq!(
                headings,
                vec!["8.1 Receive the request", "8.2 Assess the request"]
            );
        });
    }

    #[test]
    fn test_section_lookup_uses_substring_and_level() {
        let source = "## Index\n\ntext\n\n#### Scope notes\n\nbody\n";
        with_tree(source, |root| {
            let document = SopDocument::new(Path::new("doc.md"), root);
            assert!(document.section(&SectionLocator::new(2, "Index")).is_some());
            assert!(document.section(&SectionLocator::new(3, "Scope")).is_none());
            assert!(document.section(&SectionLocator::new(4, "Scope")).is_some());
        });
    }

    #[test]
    fn test_title_is_first_h1() {
        let source = "## Sub\n\n# First\n\n# Second\n";
        with_tree(source, |root| {
            let document = SopDocument::new(Path::new("doc.md"), root);
            assert_eq!(document.title().map(|n| n.plain_text()).as_deref(), Some("First"));
        });
    }

    #[test]
    fn test_table_returns_first_match() {
        let source = "| Metadata | Value |\n|---|---|\n| a | 1 |\n\n| Metadata | Value |\n|---|---|\n| b | 2 |\n";
        with_tree(source, |root| {
            let document = SopDocument::new(Path::new("doc.md"), root);
            let table = document.table(METADATA_HEADERS).unwrap();
            assert_eq!(table.table_rows()[1][0], "a");
        });
    }
}
