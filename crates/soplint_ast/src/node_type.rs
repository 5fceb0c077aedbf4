//! Node type definitions for the document tree.

use serde::{Deserialize, Serialize};

/// Kinds of nodes produced by the markdown adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub enum NodeType {
    // Document structure
    /// Root document node.
    Document,

    // Block elements
    /// Paragraph containing inline content.
    Paragraph,
    /// Heading (H1-H6).
    Header,
    /// Block quote.
    BlockQuote,
    /// Ordered or unordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Fenced or indented code block.
    CodeBlock,
    /// Horizontal rule / thematic break.
    HorizontalRule,
    /// Raw HTML, also used for constructs the adapter does not model.
    Html,

    // Inline elements
    /// Plain text string.
    Str,
    /// Soft or hard line break.
    Break,
    /// Emphasis (italic).
    Emphasis,
    /// Strong emphasis (bold).
    Strong,
    /// Strikethrough text.
    Delete,
    /// Inline code.
    Code,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
    /// Reference-style link (`[text][label]`).
    LinkReference,
    /// Reference-style image.
    ImageReference,

    // GFM tables
    /// Table.
    Table,
    /// Table row. The first row of a table is its header row.
    TableRow,
    /// Table cell.
    TableCell,
}
