//! Structural predicates: DOCTYPE, required tags, title, lang, charset.

use super::dom::page_titles;
use super::types::{Defect, Page, RuleSet};

pub fn check_doctype(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    if page.doc.starts_with_doctype() {
        Vec::new()
    } else {
        vec![Defect::page("missing <!DOCTYPE> declaration")]
    }
}

fn require_tag(page: &Page<'_>, tag: &str) -> Vec<Defect> {
    if page.doc.find_first(tag).is_some() {
        Vec::new()
    } else {
        vec![Defect::page(format!("missing <{tag}> tag"))]
    }
}

pub fn check_html_tag(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    require_tag(page, "html")
}

pub fn check_head_tag(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    require_tag(page, "head")
}

pub fn check_body_tag(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    require_tag(page, "body")
}

/// Exactly one `<title>` with non-empty text.
pub fn check_title(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    let titles = page_titles(doc);
    match titles.as_slice() {
        [] => vec![Defect::page("missing <title> tag")],
        [only] => {
            if doc.text(*only).is_empty() {
                vec![Defect::at(doc.element(*only).line, "empty <title>")]
            } else {
                Vec::new()
            }
        }
        [_, second, ..] => vec![Defect::at(
            doc.element(*second).line,
            format!("{} <title> tags (expected exactly one)", titles.len()),
        )],
    }
}

/// The root element declares a language. Absence of `<html>` is reported
/// by `check_html_tag`, not here.
pub fn check_lang(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let Some(html) = page.doc.find_first("html") else {
        return Vec::new();
    };
    let el = page.doc.element(html);
    if el.non_empty_attr("lang").is_some() {
        Vec::new()
    } else {
        vec![Defect::at(el.line, "<html> element has no lang attribute")]
    }
}

/// `<meta charset>` or `<meta http-equiv="Content-Type">`.
pub fn check_charset(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    let declared = doc.find_all("meta").any(|id| {
        let el = doc.element(id);
        el.has_attr("charset")
            || el
                .attr("http-equiv")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-type"))
    });
    if declared {
        Vec::new()
    } else {
        vec![Defect::page("no character encoding declared (<meta charset>)")]
    }
}
