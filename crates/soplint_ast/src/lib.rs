//! # soplint_ast
//!
//! Document tree definitions for soplint.
//!
//! Markdown sources are converted into a tree of [`TxtNode`]s allocated in a
//! single [`AstArena`] per document. Lint rules never look at `TxtNode`
//! directly: they are written against the [`TreeNode`] capability trait, so
//! any tree exposing ordered children, heading levels, table cells, link
//! targets and text can be linted.
//!
//! ## Example
//!
//! ```rust
//! use soplint_ast::{AstArena, NodeData, NodeType, Span, TreeNode, TxtNode};
//!
//! let arena = AstArena::new();
//!
//! let text = arena.alloc(TxtNode::new_text(NodeType::Str, Span::new(2, 7), "Scope"));
//! let children = arena.alloc_slice_copy(&[*text]);
//! let mut heading = TxtNode::new_parent(NodeType::Header, Span::new(0, 7), children);
//! heading.data = NodeData::header(3);
//!
//! assert_eq!(heading.heading_depth(), Some(3));
//! assert_eq!(heading.plain_text(), "Scope");
//! ```

mod arena;
mod node;
mod node_type;
mod span;
pub mod tree;

pub use arena::AstArena;
pub use node::{LinkData, NodeData, TxtNode};
pub use node_type::NodeType;
pub use span::Span;
pub use tree::{TreeNode, section_range};
