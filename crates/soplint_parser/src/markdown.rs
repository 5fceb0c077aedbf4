//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! Converts the mdast produced by the `markdown` crate into a soplint tree.
//! GFM is enabled because SOP metadata, history and roles live in tables.
//! Reference-style links and images are resolved against their definitions,
//! so `[text][id]` becomes a `Link` carrying the defined target.

use std::collections::HashMap;

use markdown::mdast::{Definition, Node};
use markdown::{ParseOptions, to_mdast};
use soplint_ast::{AstArena, NodeData, NodeType, Span, TxtNode};

use crate::{ParseError, Parser};

/// Markdown parser implementation (CommonMark + GFM).
#[derive(Debug)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self
    }

    fn default_options() -> ParseOptions {
        ParseOptions::gfm()
    }
}

/// Collects link reference definitions by identifier. The first definition
/// of an identifier wins.
fn collect_definitions<'m>(node: &'m Node, definitions: &mut HashMap<&'m str, &'m Definition>) {
    if let Node::Definition(definition) = node {
        definitions
            .entry(definition.identifier.as_str())
            .or_insert(definition);
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, definitions);
        }
    }
}

/// mdast to `TxtNode` conversion for one document.
struct Converter<'m> {
    definitions: HashMap<&'m str, &'m Definition>,
}

impl<'m> Converter<'m> {
    fn new(root: &'m Node) -> Self {
        let mut definitions = HashMap::new();
        collect_definitions(root, &mut definitions);
        Self { definitions }
    }

    /// Converts an mdast node to TxtNode.
    fn convert_node<'a>(&self, arena: &'a AstArena, node: &Node) -> TxtNode<'a> {
        match node {
            Node::Root(root) => {
                self.create_parent_node(arena, node, &root.children, NodeType::Document)
            }

            Node::Paragraph(para) => {
                self.create_parent_node(arena, node, &para.children, NodeType::Paragraph)
            }

            Node::Heading(heading) => {
                let mut converted =
                    self.create_parent_node(arena, node, &heading.children, NodeType::Header);
                converted.data = NodeData::header(heading.depth);
                converted
            }

            Node::Text(text) => self.create_text_node(arena, node, &text.value, NodeType::Str),

            Node::Emphasis(em) => {
                self.create_parent_node(arena, node, &em.children, NodeType::Emphasis)
            }

            Node::Strong(strong) => {
                self.create_parent_node(arena, node, &strong.children, NodeType::Strong)
            }

            Node::InlineCode(code) => {
                self.create_text_node(arena, node, &code.value, NodeType::Code)
            }

            Node::Code(code) => {
                let mut converted =
                    self.create_text_node(arena, node, &code.value, NodeType::CodeBlock);
                converted.data =
                    NodeData::code_block(code.lang.as_deref().map(|lang| arena.alloc_str(lang)));
                converted
            }

            Node::Link(link) => {
                let mut converted =
                    self.create_parent_node(arena, node, &link.children, NodeType::Link);
                converted.data = link_data(arena, &link.url, link.title.as_deref());
                converted
            }

            Node::Image(image) => {
                let mut converted = self.create_leaf_node(node, NodeType::Image);
                converted.data = link_data(arena, &image.url, image.title.as_deref());
                converted
            }

            Node::List(list) => {
                let mut converted =
                    self.create_parent_node(arena, node, &list.children, NodeType::List);
                converted.data = NodeData::list(list.ordered);
                converted
            }

            Node::ListItem(item) => {
                self.create_parent_node(arena, node, &item.children, NodeType::ListItem)
            }

            Node::Blockquote(quote) => {
                self.create_parent_node(arena, node, &quote.children, NodeType::BlockQuote)
            }

            Node::ThematicBreak(_) => self.create_leaf_node(node, NodeType::HorizontalRule),

            Node::Break(_) => self.create_leaf_node(node, NodeType::Break),

            Node::Html(html) => self.create_text_node(arena, node, &html.value, NodeType::Html),

            Node::Delete(del) => {
                self.create_parent_node(arena, node, &del.children, NodeType::Delete)
            }

            Node::Table(table) => {
                self.create_parent_node(arena, node, &table.children, NodeType::Table)
            }

            Node::TableRow(row) => {
                self.create_parent_node(arena, node, &row.children, NodeType::TableRow)
            }

            Node::TableCell(cell) => {
                self.create_parent_node(arena, node, &cell.children, NodeType::TableCell)
            }

            Node::LinkReference(reference) => {
                match self.definitions.get(reference.identifier.as_str()) {
                    Some(definition) => {
                        let mut converted = self.create_parent_node(
                            arena,
                            node,
                            &reference.children,
                            NodeType::Link,
                        );
                        converted.data =
                            link_data(arena, &definition.url, definition.title.as_deref());
                        converted
                    }
                    None => self.create_parent_node(
                        arena,
                        node,
                        &reference.children,
                        NodeType::LinkReference,
                    ),
                }
            }

            Node::ImageReference(reference) => {
                match self.definitions.get(reference.identifier.as_str()) {
                    Some(definition) => {
                        let mut converted = self.create_leaf_node(node, NodeType::Image);
                        converted.data =
                            link_data(arena, &definition.url, definition.title.as_deref());
                        converted
                    }
                    None => self.create_leaf_node(node, NodeType::ImageReference),
                }
            }

            // Definitions are folded into their references; footnotes and
            // other constructs carry nothing the rules read
            _ => self.create_leaf_node(node, NodeType::Html),
        }
    }

    fn create_parent_node<'a>(
        &self,
        arena: &'a AstArena,
        node: &Node,
        children: &[Node],
        node_type: NodeType,
    ) -> TxtNode<'a> {
        let children = self.convert_children(arena, children);
        TxtNode::new_parent(node_type, node_span(node), children)
    }

    fn create_text_node<'a>(
        &self,
        arena: &'a AstArena,
        node: &Node,
        text: &str,
        node_type: NodeType,
    ) -> TxtNode<'a> {
        TxtNode::new_text(node_type, node_span(node), arena.alloc_str(text))
    }

    fn create_leaf_node<'a>(&self, node: &Node, node_type: NodeType) -> TxtNode<'a> {
        TxtNode::new_leaf(node_type, node_span(node))
    }

    fn convert_children<'a>(&self, arena: &'a AstArena, children: &[Node]) -> &'a [TxtNode<'a>] {
        arena.alloc_slice_fill_iter(children.iter().map(|child| self.convert_node(arena, child)))
    }
}

fn link_data<'a>(arena: &'a AstArena, url: &str, title: Option<&str>) -> NodeData<'a> {
    NodeData::link(arena.alloc_str(url), title.map(|t| arena.alloc_str(t)))
}

fn node_span(node: &Node) -> Span {
    if let Some(pos) = node.position() {
        Span::new(pos.start.offset as u32, pos.end.offset as u32)
    } else {
        Span::new(0, 0)
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &str) -> Result<TxtNode<'a>, ParseError> {
        let options = Self::default_options();
        let mdast =
            to_mdast(source, &options).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        Ok(Converter::new(&mdast).convert_node(arena, &mdast))
    }
}
