//! Link quality predicates.

use super::types::{Defect, Page, RuleSet};

/// Anchor text (ARIA label first, else visible text) is not drawn from the
/// non-descriptive denylist.
pub fn check_descriptive_text(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    doc.find_all("a")
        .filter_map(|id| {
            let el = doc.element(id);
            let label = match el.non_empty_attr("aria-label") {
                Some(aria) => aria.to_lowercase(),
                None => doc.text(id).to_lowercase(),
            };
            rules.non_descriptive_link_text.contains(&label).then(|| {
                Defect::at(
                    el.line,
                    format!(
                        "non-descriptive link text \"{label}\" (href=\"{}\")",
                        el.attr("href").unwrap_or("")
                    ),
                )
            })
        })
        .collect()
}

/// Whether `href` is an absolute http(s) URL with a host. Internal paths,
/// fragments, mailto links and malformed URLs are not external.
pub fn is_external_href(href: &str) -> bool {
    let href = href.trim();
    if href.starts_with('/') || href.starts_with('#') || href.starts_with("mailto:") {
        return false;
    }
    let lower = href.to_ascii_lowercase();
    let rest = match lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !host.contains(char::is_whitespace)
}

/// External links open in a new tab or declare an external/noopener relation.
pub fn check_external_marked(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    doc.find_all("a")
        .filter_map(|id| {
            let el = doc.element(id);
            let href = el.attr("href")?;
            if !is_external_href(href) {
                return None;
            }
            let new_tab = el
                .attr("target")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("_blank"));
            let marked_rel =
                el.has_attr_token("rel", "external") || el.has_attr_token("rel", "noopener");
            (!new_tab && !marked_rel).then(|| {
                Defect::at(
                    el.line,
                    format!(
                        "external link {} lacks target=\"_blank\" or rel=\"external\"/\"noopener\"",
                        href.trim()
                    ),
                )
            })
        })
        .collect()
}
