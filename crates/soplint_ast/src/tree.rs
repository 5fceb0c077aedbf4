//! Capability interface over document trees.
//!
//! Lint rules only need a handful of things from a tree: node kinds, ordered
//! children, heading levels, link targets and literal text. [`TreeNode`]
//! captures exactly that, plus derived helpers built on top of it, so rules
//! stay independent of the markdown adapter that produced the tree.

use std::ops::Range;

use crate::{NodeData, NodeType, TxtNode};

/// Read-only access to a node of a parsed document.
pub trait TreeNode: Sized {
    /// The kind of this node.
    fn kind(&self) -> NodeType;

    /// Ordered child nodes.
    fn children(&self) -> &[Self];

    /// Heading level (1-6) for heading nodes.
    fn heading_depth(&self) -> Option<u8>;

    /// Target URL for links and images.
    fn target(&self) -> Option<&str>;

    /// Literal value for text-bearing nodes.
    fn literal(&self) -> Option<&str>;

    /// Concatenated plain text of this node and its descendants.
    ///
    /// Inline code counts as text, raw HTML does not, line breaks become
    /// a single space.
    fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// All descendants of the given kind, in document order.
    fn find_all(&self, kind: NodeType) -> Vec<&Self> {
        let mut found = Vec::new();
        collect_kind(self, kind, &mut found);
        found
    }

    /// Rows of a table node as trimmed cell texts, header row first.
    fn table_rows(&self) -> Vec<Vec<String>> {
        self.children()
            .iter()
            .filter(|row| row.kind() == NodeType::TableRow)
            .map(|row| {
                row.children()
                    .iter()
                    .filter(|cell| cell.kind() == NodeType::TableCell)
                    .map(|cell| cell.plain_text().trim().to_string())
                    .collect()
            })
            .collect()
    }
}

fn collect_text<N: TreeNode>(node: &N, out: &mut String) {
    match node.kind() {
        NodeType::Str | NodeType::Code | NodeType::CodeBlock => {
            if let Some(text) = node.literal() {
                out.push_str(text);
            }
        }
        NodeType::Break => out.push(' '),
        NodeType::Html => {}
        _ => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
    }
}

fn collect_kind<'n, N: TreeNode>(node: &'n N, kind: NodeType, found: &mut Vec<&'n N>) {
    for child in node.children() {
        if child.kind() == kind {
            found.push(child);
        }
        collect_kind(child, kind, found);
    }
}

/// Index range of the siblings that belong to the heading at `heading_index`.
///
/// The range starts right after the heading and stops before the next
/// sibling heading whose level is equal to or higher than (numerically at
/// most) the heading's own level. Deeper headings are part of the section.
/// A non-heading index yields an empty range.
pub fn section_range<N: TreeNode>(siblings: &[N], heading_index: usize) -> Range<usize> {
    let start = heading_index + 1;
    let Some(depth) = siblings.get(heading_index).and_then(N::heading_depth) else {
        return start..start;
    };

    let end = siblings[start..]
        .iter()
        .position(|sibling| sibling.heading_depth().is_some_and(|d| d <= depth))
        .map_or(siblings.len(), |offset| start + offset);

    start..end
}

impl<'a> TreeNode for TxtNode<'a> {
    #[inline]
    fn kind(&self) -> NodeType {
        self.node_type
    }

    #[inline]
    fn children(&self) -> &[Self] {
        self.children
    }

    #[inline]
    fn heading_depth(&self) -> Option<u8> {
        match self.data {
            NodeData::Header(depth) if self.node_type == NodeType::Header => Some(depth),
            _ => None,
        }
    }

    #[inline]
    fn target(&self) -> Option<&str> {
        match self.data {
            NodeData::Link(link) => Some(link.url),
            _ => None,
        }
    }

    #[inline]
    fn literal(&self) -> Option<&str> {
        self.value
    }
}
