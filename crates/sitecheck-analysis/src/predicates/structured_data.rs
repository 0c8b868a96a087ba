//! JSON-LD structured data predicates.

use serde_json::Value;

use super::dom::{has_schema_type, json_ld_blocks, missing_fields, schema_objects};
use super::types::{Defect, Page, RuleSet};

/// Every JSON-LD block parses as JSON.
pub fn check_valid_json(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    json_ld_blocks(page.doc)
        .into_iter()
        .filter_map(|block| match block.parsed {
            Err(e) => Some(Defect::at(block.line, format!("invalid JSON-LD: {e}"))),
            Ok(_) => None,
        })
        .collect()
}

/// Every parseable block carries `field`. Unparseable blocks are left to
/// `check_valid_json`.
fn require_block_field(page: &Page<'_>, field: &str) -> Vec<Defect> {
    let mut defects = Vec::new();
    for block in json_ld_blocks(page.doc) {
        let Ok(value) = &block.parsed else {
            continue;
        };
        match value {
            Value::Object(map) => {
                if !map.contains_key(field) {
                    defects.push(Defect::at(block.line, format!("JSON-LD block missing {field}")));
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let present = item.as_object().is_some_and(|m| m.contains_key(field));
                    if !present {
                        defects.push(Defect::at(
                            block.line,
                            format!("JSON-LD array item {i} missing {field}"),
                        ));
                    }
                }
            }
            _ => defects.push(Defect::at(
                block.line,
                format!("JSON-LD block is not an object (missing {field})"),
            )),
        }
    }
    defects
}

pub fn check_context(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    require_block_field(page, "@context")
}

pub fn check_type(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    require_block_field(page, "@type")
}

/// The homepage has exactly one `WebSite` block carrying the required fields.
pub fn check_website_schema(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let blocks = json_ld_blocks(page.doc);
    let sites: Vec<_> = schema_objects(&blocks)
        .into_iter()
        .filter(|(_, obj)| has_schema_type(obj, "WebSite"))
        .collect();

    match sites.as_slice() {
        [] => vec![Defect::page("homepage is missing a WebSite JSON-LD block")],
        [(line, obj)] => {
            let missing = missing_fields(obj, &rules.website_required);
            if missing.is_empty() {
                Vec::new()
            } else {
                vec![Defect::at(
                    *line,
                    format!("WebSite block missing required fields: {}", missing.join(", ")),
                )]
            }
        }
        [_, (line, _), ..] => vec![Defect::at(
            *line,
            format!("homepage has {} WebSite blocks (expected exactly one)", sites.len()),
        )],
    }
}

/// Blog posts carry an `Article` block with the required fields. The first
/// `Article` block is the one inspected.
pub fn check_article_schema(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let blocks = json_ld_blocks(page.doc);
    let objects = schema_objects(&blocks);
    let Some((line, article)) = objects
        .into_iter()
        .find(|(_, obj)| has_schema_type(obj, "Article"))
    else {
        return vec![Defect::page("blog post is missing an Article JSON-LD block")];
    };
    let missing = missing_fields(article, &rules.article_required);
    if missing.is_empty() {
        Vec::new()
    } else {
        vec![Defect::at(
            line,
            format!("Article block missing required fields: {}", missing.join(", ")),
        )]
    }
}

/// Recommended `Article` fields. Posts without an Article block are
/// reported by `check_article_schema`.
pub fn check_article_recommended(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let blocks = json_ld_blocks(page.doc);
    let objects = schema_objects(&blocks);
    let Some((line, article)) = objects
        .into_iter()
        .find(|(_, obj)| has_schema_type(obj, "Article"))
    else {
        return Vec::new();
    };
    let missing = missing_fields(article, &rules.article_recommended);
    if missing.is_empty() {
        Vec::new()
    } else {
        vec![Defect::at(
            line,
            format!("Article block missing recommended fields: {}", missing.join(", ")),
        )]
    }
}
