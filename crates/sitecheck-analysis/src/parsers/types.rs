//! Owned HTML document tree and its query operations.

use serde::Serialize;

/// Index of an element inside its owning `HtmlDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

/// A child of an element (or of the document): a nested element or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Element(NodeId),
    /// Entity-decoded text. Inter-token whitespace is kept as `" "`.
    Text(String),
}

/// One element. Tag and attribute names are lowercased; attribute values
/// are entity-decoded, and a valueless attribute has the value `""`.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub parent: Option<NodeId>,
    pub children: Vec<Child>,
    /// 1-based source line of the start tag.
    pub line: u32,
    /// Unparsed contents of raw-text elements (`script`, `style`).
    pub raw_text: Option<String>,
}

impl Element {
    /// First value of attribute `name` (lowercase).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Attribute value with surrounding whitespace removed, `None` if the
    /// attribute is absent or blank.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Whether the whitespace-separated token list in `name` contains
    /// `token`, compared case-insensitively (`rel`, `role`).
    pub fn has_attr_token(&self, name: &str, token: &str) -> bool {
        self.attr(name).is_some_and(|v| {
            v.split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }
}

/// A parsed document. Elements are stored in document order, so iterating
/// the arena visits start tags in source order.
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    pub(crate) elements: Vec<Element>,
    pub(crate) top: Vec<Child>,
    pub(crate) starts_with_doctype: bool,
    pub(crate) error_count: u32,
    pub(crate) error_lines: Vec<u32>,
}

impl HtmlDocument {
    /// Whether the raw source begins with `<!DOCTYPE` (case-insensitive),
    /// ignoring a byte-order mark and leading whitespace.
    pub fn starts_with_doctype(&self) -> bool {
        self.starts_with_doctype
    }

    /// Number of syntax error nodes the parser recovered from.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn error_lines(&self) -> &[u32] {
        &self.error_lines
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.elements[id.0]
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        self.elements.iter().enumerate().map(|(i, e)| (NodeId(i), e))
    }

    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        self.find_all(tag).next()
    }

    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.elements()
            .filter(move |(_, e)| e.tag == tag)
            .map(|(id, _)| id)
    }

    /// Elements of any tag in `tags`, in document order.
    pub fn find_any<'a>(&'a self, tags: &'a [&'a str]) -> impl Iterator<Item = NodeId> + 'a {
        self.elements()
            .filter(move |(_, e)| tags.contains(&e.tag.as_str()))
            .map(|(id, _)| id)
    }

    /// Elements carrying attribute `name`.
    pub fn find_by_attr<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.elements()
            .filter(move |(_, e)| e.has_attr(name))
            .map(|(id, _)| id)
    }

    /// Elements whose attribute `name` equals `value` exactly.
    pub fn find_by_attr_value<'a>(
        &'a self,
        name: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.elements()
            .filter(move |(_, e)| e.attr(name) == Some(value))
            .map(|(id, _)| id)
    }

    /// `<tag attr="value">` elements, attribute value compared
    /// case-insensitively.
    pub fn find_tag_with_attr<'a>(
        &'a self,
        tag: &'a str,
        attr: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.find_all(tag).filter(move |id| {
            self.element(*id)
                .attr(attr)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
        })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).parent
    }

    /// Whether any ancestor of `id` is a `tag` element.
    pub fn has_ancestor(&self, id: NodeId, tag: &str) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if self.element(p).tag == tag {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Rendered text of an element: all descendant text concatenated,
    /// whitespace collapsed to single spaces and trimmed. Raw-text
    /// elements contribute nothing.
    pub fn text(&self, id: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(&self.element(id).children, &mut raw);
        normalize_whitespace(&raw)
    }

    /// Descendant text with only the ends trimmed; internal whitespace is
    /// kept as written.
    pub fn trimmed_text(&self, id: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(&self.element(id).children, &mut raw);
        raw.trim().to_string()
    }

    /// Rendered text of the whole document.
    pub fn document_text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&self.top, &mut raw);
        normalize_whitespace(&raw)
    }

    /// Raw contents of a `script`/`style` element.
    pub fn raw_text(&self, id: NodeId) -> Option<&str> {
        self.element(id).raw_text.as_deref()
    }

    fn collect_text(&self, children: &[Child], out: &mut String) {
        for child in children {
            match child {
                Child::Text(t) => out.push_str(t),
                Child::Element(id) => self.collect_text(&self.element(*id).children, out),
            }
        }
    }
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
