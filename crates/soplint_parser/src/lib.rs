//! # soplint_parser
//!
//! Converts SOP markdown sources into soplint document trees.
//!
//! - A `Parser` trait for alternative front-ends
//! - The built-in `MarkdownParser`, backed by `markdown-rs` with GFM tables
//!
//! ## Example
//!
//! ```rust
//! use soplint_ast::{AstArena, NodeType};
//! use soplint_parser::{MarkdownParser, Parser};
//!
//! let arena = AstArena::new();
//! let parser = MarkdownParser::new();
//! let source = "# European GDI - Example\n\n| Metadata | Value |\n|---|---|\n| Topic | x |";
//!
//! let ast = parser.parse(&arena, source).unwrap();
//! assert_eq!(ast.children[1].node_type, NodeType::Table);
//! ```

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::Parser;
