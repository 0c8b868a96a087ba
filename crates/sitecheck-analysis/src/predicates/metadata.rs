//! Canonical URL, Open Graph and Twitter Card predicates.

use super::dom::{canonical_link, meta_content};
use super::types::{Defect, Page, RuleSet};

pub fn check_canonical_present(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let Some(id) = canonical_link(page.doc) else {
        return vec![Defect::page("missing <link rel=\"canonical\">")];
    };
    let el = page.doc.element(id);
    if el.non_empty_attr("href").is_some() {
        Vec::new()
    } else {
        vec![Defect::at(el.line, "canonical link has an empty href")]
    }
}

/// The canonical URL is scheme-qualified.
pub fn check_canonical_absolute(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let Some(id) = canonical_link(page.doc) else {
        return Vec::new();
    };
    let el = page.doc.element(id);
    let Some(href) = el.non_empty_attr("href") else {
        return Vec::new();
    };
    let lower = href.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Vec::new()
    } else {
        vec![Defect::at(
            el.line,
            format!("canonical URL \"{href}\" is not absolute"),
        )]
    }
}

/// Each `required` key exists as `<meta {key_attr}=key>` with non-empty content.
fn require_meta(page: &Page<'_>, key_attr: &str, required: &[String]) -> Vec<Defect> {
    required
        .iter()
        .filter_map(|key| match meta_content(page.doc, key_attr, key) {
            None => Some(Defect::page(format!("missing {key}"))),
            Some((line, content)) if content.is_empty() => {
                Some(Defect::at(line, format!("{key} has empty content")))
            }
            Some(_) => None,
        })
        .collect()
}

/// The value of `key`, when present and non-empty, is on the allow-list.
fn constrain_meta(
    page: &Page<'_>,
    key_attr: &str,
    key: &str,
    allowed: &[String],
) -> Vec<Defect> {
    match meta_content(page.doc, key_attr, key) {
        Some((line, value)) if !value.is_empty() && !allowed.contains(&value) => {
            vec![Defect::at(
                line,
                format!(
                    "{key} \"{value}\" is not one of: {}",
                    allowed.join(", ")
                ),
            )]
        }
        _ => Vec::new(),
    }
}

pub fn check_open_graph(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    require_meta(page, "property", &rules.og_required)
}

pub fn check_og_type(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    constrain_meta(page, "property", "og:type", &rules.og_types)
}

pub fn check_twitter_card(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    require_meta(page, "name", &rules.twitter_required)
}

pub fn check_twitter_card_type(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    constrain_meta(page, "name", "twitter:card", &rules.twitter_cards)
}
