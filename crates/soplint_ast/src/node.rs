//! TxtNode definition.

use crate::{NodeType, Span};

/// A node in the document tree.
///
/// Nodes are `Copy` and borrow their children and strings from the
/// [`AstArena`](crate::AstArena) they were allocated in.
///
/// # Example
///
/// ```rust
/// use soplint_ast::{AstArena, TxtNode, NodeType, Span};
///
/// let arena = AstArena::new();
///
/// let text_node = arena.alloc(TxtNode::new_text(
///     NodeType::Str,
///     Span::new(0, 5),
///     "Hello",
/// ));
///
/// let children = arena.alloc_slice_copy(&[*text_node]);
/// let paragraph = TxtNode::new_parent(
///     NodeType::Paragraph,
///     Span::new(0, 5),
///     children,
/// );
/// assert!(paragraph.has_children());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TxtNode<'a> {
    /// The type of this node.
    pub node_type: NodeType,

    /// Byte span in the source text.
    pub span: Span,

    /// Child nodes (for parent nodes).
    pub children: &'a [TxtNode<'a>],

    /// Text value (for text nodes like Str, Code, CodeBlock, Html).
    pub value: Option<&'a str>,

    /// Additional node-specific data.
    pub data: NodeData<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
pub enum NodeData<'a> {
    #[default]
    None,
    Header(u8),
    List(bool),
    CodeBlock(Option<&'a str>),
    Link(LinkData<'a>),
}

/// Target of a link or image.
#[derive(Debug, Clone, Copy)]
pub struct LinkData<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
}

impl<'a> TxtNode<'a> {
    /// Creates a new parent node with children.
    #[inline]
    pub const fn new_parent(node_type: NodeType, span: Span, children: &'a [TxtNode<'a>]) -> Self {
        Self {
            node_type,
            span,
            children,
            value: None,
            data: NodeData::new(),
        }
    }

    /// Creates a new text node with a value.
    #[inline]
    pub const fn new_text(node_type: NodeType, span: Span, value: &'a str) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            value: Some(value),
            data: NodeData::new(),
        }
    }

    /// Creates a new leaf node (no children, no value).
    #[inline]
    pub const fn new_leaf(node_type: NodeType, span: Span) -> Self {
        Self {
            node_type,
            span,
            children: &[],
            value: None,
            data: NodeData::new(),
        }
    }

    /// Returns true if this node has children.
    #[inline]
    pub const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the literal value of a text node.
    #[inline]
    pub const fn text(&self) -> Option<&'a str> {
        self.value
    }
}

impl<'a> NodeData<'a> {
    /// Creates new empty node data.
    #[inline]
    pub const fn new() -> Self {
        Self::None
    }

    /// Creates node data for a heading.
    #[inline]
    pub const fn header(depth: u8) -> Self {
        Self::Header(depth)
    }

    /// Creates node data for a link or image.
    #[inline]
    pub const fn link(url: &'a str, title: Option<&'a str>) -> Self {
        Self::Link(LinkData { url, title })
    }

    /// Creates node data for a code block.
    #[inline]
    pub const fn code_block(lang: Option<&'a str>) -> Self {
        Self::CodeBlock(lang)
    }

    /// Creates node data for a list.
    #[inline]
    pub const fn list(ordered: bool) -> Self {
        Self::List(ordered)
    }
}
