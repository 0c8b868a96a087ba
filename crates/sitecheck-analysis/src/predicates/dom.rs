//! Shared document lookups used by several predicate categories.

use serde_json::Value;

use crate::parsers::{HtmlDocument, NodeId};

/// Document `<title>` elements. Titles inside inline SVG label the graphic,
/// not the page, and are ignored.
pub fn page_titles(doc: &HtmlDocument) -> Vec<NodeId> {
    doc.find_all("title")
        .filter(|id| !doc.has_ancestor(*id, "svg"))
        .collect()
}

/// Trimmed text of the first page title, if any.
pub fn page_title_text(doc: &HtmlDocument) -> Option<String> {
    page_titles(doc).first().map(|id| doc.text(*id))
}

/// First `<meta {key_attr}="{key}">` element (key compared case-insensitively).
pub fn find_meta(doc: &HtmlDocument, key_attr: &str, key: &str) -> Option<NodeId> {
    doc.find_tag_with_attr("meta", key_attr, key).next()
}

/// Trimmed `content` of a meta element, `None` when the element is absent.
pub fn meta_content(doc: &HtmlDocument, key_attr: &str, key: &str) -> Option<(u32, String)> {
    find_meta(doc, key_attr, key).map(|id| {
        let el = doc.element(id);
        (el.line, el.attr("content").unwrap_or("").trim().to_string())
    })
}

/// First `<link rel="canonical">`.
pub fn canonical_link(doc: &HtmlDocument) -> Option<NodeId> {
    doc.find_all("link")
        .find(|id| doc.element(*id).has_attr_token("rel", "canonical"))
}

/// One `<script type="application/ld+json">` block.
#[derive(Debug)]
pub struct JsonLdBlock {
    pub line: u32,
    pub parsed: Result<Value, String>,
}

/// Every JSON-LD block in document order, parsed.
pub fn json_ld_blocks(doc: &HtmlDocument) -> Vec<JsonLdBlock> {
    doc.find_all("script")
        .filter(|id| {
            doc.element(*id)
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
        })
        .map(|id| {
            let raw = doc.raw_text(id).unwrap_or("").trim();
            JsonLdBlock {
                line: doc.element(id).line,
                parsed: serde_json::from_str::<Value>(raw).map_err(|e| e.to_string()),
            }
        })
        .collect()
}

/// Schema objects in parseable blocks. Top-level arrays are flattened.
pub fn schema_objects(blocks: &[JsonLdBlock]) -> Vec<(u32, &serde_json::Map<String, Value>)> {
    let mut out = Vec::new();
    for block in blocks {
        match &block.parsed {
            Ok(Value::Object(map)) => out.push((block.line, map)),
            Ok(Value::Array(items)) => {
                out.extend(items.iter().filter_map(|v| v.as_object()).map(|m| (block.line, m)))
            }
            _ => {}
        }
    }
    out
}

/// Whether a schema object's `@type` is `ty`, directly or as an array member.
pub fn has_schema_type(obj: &serde_json::Map<String, Value>, ty: &str) -> bool {
    match obj.get("@type") {
        Some(Value::String(s)) => s == ty,
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some(ty)),
        _ => false,
    }
}

/// Required fields absent from `obj`, in the order given.
pub fn missing_fields<'a>(obj: &serde_json::Map<String, Value>, fields: &'a [String]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|f| !obj.contains_key(f.as_str()))
        .map(String::as_str)
        .collect()
}
