//! Parser trait definition.

use soplint_ast::{AstArena, TxtNode};

use crate::ParseError;

/// Trait for parsing source text into a document tree.
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a tree allocated in `arena`.
    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
