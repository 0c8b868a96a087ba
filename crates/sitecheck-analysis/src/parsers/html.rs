//! tree-sitter HTML parsing into an owned `HtmlDocument`.
//!
//! The grammar recovers from malformed markup by wrapping the damage in
//! ERROR nodes. Conversion flattens ERROR subtrees so that tags inside them
//! are still visible to predicates.

use std::cell::RefCell;

use sitecheck_core::errors::ParseError;
use tree_sitter::{Node, Parser};

use super::entities::decode_entities;
use super::error_tolerant::count_errors;
use super::types::{Child, Element, HtmlDocument, NodeId};

thread_local! {
    static PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// Parse raw document bytes. Invalid UTF-8 is replaced, never rejected.
pub fn parse_html(source: &[u8], path: &str) -> Result<HtmlDocument, ParseError> {
    let text = String::from_utf8_lossy(source);

    let tree = PARSER.with(|cell| -> Result<_, ParseError> {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let mut parser = Parser::new();
            parser
                .set_language(&tree_sitter_html::LANGUAGE.into())
                .map_err(|e| ParseError::GrammarUnavailable {
                    message: e.to_string(),
                })?;
            *slot = Some(parser);
        }
        let parser = slot.as_mut().ok_or_else(|| ParseError::GrammarUnavailable {
            message: "parser not initialized".to_string(),
        })?;
        parser.parse(text.as_bytes(), None).ok_or_else(|| ParseError::NoTree {
            path: path.to_string(),
        })
    })?;

    let root = tree.root_node();
    let (error_count, error_lines) = if root.has_error() {
        count_errors(root)
    } else {
        (0, Vec::new())
    };

    let mut builder = TreeBuilder {
        src: &text,
        elements: Vec::new(),
    };
    let mut top = Vec::new();
    builder.convert_content(root, None, root.start_byte(), &mut top);

    Ok(HtmlDocument {
        elements: builder.elements,
        top,
        starts_with_doctype: starts_with_doctype(&text),
        error_count,
        error_lines,
    })
}

fn starts_with_doctype(text: &str) -> bool {
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    trimmed
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"))
}

struct TreeBuilder<'s> {
    src: &'s str,
    elements: Vec<Element>,
}

impl TreeBuilder<'_> {
    fn node_text(&self, node: Node) -> &str {
        self.src.get(node.start_byte()..node.end_byte()).unwrap_or("")
    }

    /// Convert the content children of `node` into `out`. `start` is the
    /// byte offset where content begins (after the start tag, for elements).
    fn convert_content(
        &mut self,
        node: Node,
        parent: Option<NodeId>,
        start: usize,
        out: &mut Vec<Child>,
    ) {
        let mut prev_end = start;
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();

        for child in children {
            if child.start_byte() < start {
                continue;
            }
            if child.start_byte() > prev_end && !matches!(child.kind(), "end_tag") {
                out.push(Child::Text(" ".to_string()));
            }

            match child.kind() {
                "element" | "script_element" | "style_element" => {
                    if let Some(id) = self.convert_element(child, parent) {
                        out.push(Child::Element(id));
                    } else {
                        self.convert_content(child, parent, child.start_byte(), out);
                    }
                }
                "start_tag" | "self_closing_tag" => {
                    // A stray tag left over by error recovery.
                    let id = self.push_element(child, parent);
                    out.push(Child::Element(id));
                }
                "text" => {
                    let text = decode_entities(self.node_text(child)).into_owned();
                    out.push(Child::Text(text));
                }
                "entity" => {
                    let text = decode_entities(self.node_text(child)).into_owned();
                    out.push(Child::Text(text));
                }
                "ERROR" => {
                    self.convert_content(child, parent, child.start_byte(), out);
                }
                _ => {}
            }
            prev_end = child.end_byte();
        }
    }

    fn convert_element(&mut self, node: Node, parent: Option<NodeId>) -> Option<NodeId> {
        let mut cursor = node.walk();
        let tag_node = node
            .children(&mut cursor)
            .find(|c| matches!(c.kind(), "start_tag" | "self_closing_tag"))?;

        let id = self.push_element(tag_node, parent);

        if matches!(node.kind(), "script_element" | "style_element") {
            let mut cursor = node.walk();
            let raw = node
                .children(&mut cursor)
                .find(|c| c.kind() == "raw_text")
                .map(|c| self.node_text(c).to_string())
                .unwrap_or_default();
            self.elements[id.0].raw_text = Some(raw);
            return Some(id);
        }

        let mut children = Vec::new();
        self.convert_content(node, Some(id), tag_node.end_byte(), &mut children);
        self.elements[id.0].children = children;
        Some(id)
    }

    /// Create an element from a `start_tag`/`self_closing_tag` node.
    fn push_element(&mut self, tag_node: Node, parent: Option<NodeId>) -> NodeId {
        let mut tag = String::new();
        let mut attrs: Vec<(String, String)> = Vec::new();

        let mut cursor = tag_node.walk();
        for part in tag_node.named_children(&mut cursor) {
            match part.kind() {
                "tag_name" => tag = self.node_text(part).to_ascii_lowercase(),
                "attribute" => {
                    let (name, value) = self.attribute(part);
                    if !name.is_empty() && !attrs.iter().any(|(k, _)| *k == name) {
                        attrs.push((name, value));
                    }
                }
                _ => {}
            }
        }

        let id = NodeId(self.elements.len());
        self.elements.push(Element {
            tag,
            attrs,
            parent,
            children: Vec::new(),
            line: tag_node.start_position().row as u32 + 1,
            raw_text: None,
        });
        id
    }

    fn attribute(&self, node: Node) -> (String, String) {
        let mut name = String::new();
        let mut value = String::new();
        let mut cursor = node.walk();
        for part in node.named_children(&mut cursor) {
            match part.kind() {
                "attribute_name" => name = self.node_text(part).to_ascii_lowercase(),
                "attribute_value" => value = decode_entities(self.node_text(part)).into_owned(),
                "quoted_attribute_value" => {
                    let mut inner = part.walk();
                    value = part
                        .named_children(&mut inner)
                        .find(|c| c.kind() == "attribute_value")
                        .map(|c| decode_entities(self.node_text(c)).into_owned())
                        .unwrap_or_default();
                }
                _ => {}
            }
        }
        (name, value)
    }
}
