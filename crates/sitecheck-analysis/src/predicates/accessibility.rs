//! Accessibility predicates: landmarks, form labels, button names,
//! tabindex, keyboard access, decorative alt text.

use super::types::{Defect, Page, RuleSet};
use crate::parsers::{Element, HtmlDocument, NodeId};

const NON_LABELED_INPUT_TYPES: &[&str] = &["hidden", "submit", "button", "reset"];
const BUTTON_INPUT_TYPES: &[&str] = &["submit", "button", "reset"];
const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];
const INTERACTIVE_ROLES: &[&str] = &["button", "link", "tab"];

/// Elements that are a landmark either by tag or by explicit role.
fn landmarks(doc: &HtmlDocument, tag: &str, role: &str) -> Vec<NodeId> {
    doc.elements()
        .filter(|(_, e)| e.tag == tag || e.has_attr_token("role", role))
        .map(|(id, _)| id)
        .collect()
}

/// Exactly one primary-content landmark.
pub fn check_main_landmark(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let mains = landmarks(page.doc, "main", "main");
    match mains.len() {
        0 => vec![Defect::page("no main landmark (<main> or role=\"main\")")],
        1 => Vec::new(),
        n => vec![Defect::at(
            page.doc.element(mains[1]).line,
            format!("{n} main landmarks (expected exactly one)"),
        )],
    }
}

/// At least one navigation landmark.
pub fn check_nav_landmark(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    if landmarks(page.doc, "nav", "navigation").is_empty() {
        vec![Defect::page("no navigation landmark (<nav> or role=\"navigation\")")]
    } else {
        Vec::new()
    }
}

fn input_type(el: &Element) -> String {
    el.attr("type")
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "text".to_string())
}

fn describe(el: &Element) -> String {
    let mut out = format!("<{}", el.tag);
    for key in ["type", "id", "name"] {
        if let Some(v) = el.non_empty_attr(key) {
            out.push_str(&format!(" {key}=\"{v}\""));
        }
    }
    out.push('>');
    out
}

/// Every labelable form control has an accessible name.
pub fn check_form_labels(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    let label_targets: Vec<&str> = doc
        .find_all("label")
        .filter_map(|id| doc.element(id).non_empty_attr("for"))
        .collect();

    doc.find_any(&["input", "select", "textarea"])
        .filter_map(|id| {
            let el = doc.element(id);
            if NON_LABELED_INPUT_TYPES.contains(&input_type(el).as_str()) {
                return None;
            }
            let labelled_by_for = el
                .non_empty_attr("id")
                .is_some_and(|input_id| label_targets.contains(&input_id));
            let named = labelled_by_for
                || el.non_empty_attr("aria-label").is_some()
                || el.non_empty_attr("aria-labelledby").is_some()
                || doc.has_ancestor(id, "label");
            (!named).then(|| {
                Defect::at(el.line, format!("{} has no accessible label", describe(el)))
            })
        })
        .collect()
}

/// Every button-role control has non-empty accessible text.
pub fn check_button_names(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    doc.find_any(&["button", "input"])
        .filter_map(|id| {
            let el = doc.element(id);
            if el.tag == "input" && !BUTTON_INPUT_TYPES.contains(&input_type(el).as_str()) {
                return None;
            }
            let named = !doc.text(id).is_empty()
                || el.non_empty_attr("value").is_some()
                || el.non_empty_attr("aria-label").is_some()
                || el.non_empty_attr("aria-labelledby").is_some();
            (!named).then(|| Defect::at(el.line, format!("{} has no accessible name", describe(el))))
        })
        .collect()
}

/// No positive tabindex. Non-numeric values are left to the HTML validator.
pub fn check_positive_tabindex(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    doc.find_by_attr("tabindex")
        .filter_map(|id| {
            let el = doc.element(id);
            let value = el.attr("tabindex")?.trim();
            let n: i64 = value.parse().ok()?;
            (n > 0).then(|| {
                Defect::at(
                    el.line,
                    format!("<{}> has positive tabindex=\"{value}\"", el.tag),
                )
            })
        })
        .collect()
}

/// Click handlers on non-interactive elements need a keyboard affordance.
pub fn check_keyboard_access(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    doc.find_by_attr("onclick")
        .filter_map(|id| {
            let el = doc.element(id);
            if INTERACTIVE_TAGS.contains(&el.tag.as_str()) {
                return None;
            }
            let focusable = el.has_attr("tabindex");
            let interactive_role = el
                .attr("role")
                .map(|r| r.trim().to_ascii_lowercase())
                .is_some_and(|r| INTERACTIVE_ROLES.contains(&r.as_str()));
            (!focusable && !interactive_role).then(|| {
                Defect::at(
                    el.line,
                    format!(
                        "<{}> has onclick but no tabindex or interactive role",
                        el.tag
                    ),
                )
            })
        })
        .collect()
}

/// Decorative images should carry `alt=""`, not a word describing them as
/// decorative.
pub fn check_decorative_alt(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    doc.find_all("img")
        .filter_map(|id| {
            let el = doc.element(id);
            let alt = el.attr("alt")?.trim().to_lowercase();
            rules.decorative_alt_words.contains(&alt).then(|| {
                Defect::at(
                    el.line,
                    format!(
                        "<img src=\"{}\"> has alt=\"{alt}\"; decorative images should use alt=\"\"",
                        el.attr("src").unwrap_or("")
                    ),
                )
            })
        })
        .collect()
}
