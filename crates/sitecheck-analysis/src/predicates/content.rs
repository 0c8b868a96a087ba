//! Content and SEO predicates.

use super::dom::{meta_content, page_title_text};
use super::types::{Defect, Page, RuleSet};

/// A non-empty `<meta name="description">`.
pub fn check_description_present(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    match meta_content(page.doc, "name", "description") {
        None => vec![Defect::page("missing meta description")],
        Some((line, content)) if content.is_empty() => {
            vec![Defect::at(line, "empty meta description")]
        }
        Some(_) => Vec::new(),
    }
}

/// Description length within `[description_min, description_max]`
/// characters, wherever a description exists.
pub fn check_description_length(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let Some((line, content)) = meta_content(page.doc, "name", "description") else {
        return Vec::new();
    };
    if content.is_empty() {
        return Vec::new();
    }
    let len = content.chars().count();
    if len < rules.description_min {
        vec![Defect::at(
            line,
            format!(
                "meta description too short ({len} chars, minimum {})",
                rules.description_min
            ),
        )]
    } else if len > rules.description_max {
        vec![Defect::at(
            line,
            format!(
                "meta description too long ({len} chars, maximum {})",
                rules.description_max
            ),
        )]
    } else {
        Vec::new()
    }
}

pub fn check_single_h1(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let h1s: Vec<_> = page.doc.find_all("h1").collect();
    match h1s.len() {
        0 => vec![Defect::page("no <h1> heading")],
        1 => Vec::new(),
        n => vec![Defect::at(
            page.doc.element(h1s[1]).line,
            format!("{n} <h1> headings (expected exactly one)"),
        )],
    }
}

/// Heading levels `(line, level)` in document order.
fn heading_levels(page: &Page<'_>) -> Vec<(u32, u8)> {
    page.doc
        .find_any(&["h1", "h2", "h3", "h4", "h5", "h6"])
        .map(|id| {
            let el = page.doc.element(id);
            let level = el.tag.as_bytes()[1] - b'0';
            (el.line, level)
        })
        .collect()
}

/// Level skips between consecutive headings, e.g. `[1, 2, 4]` -> `["H2 to H4"]`.
/// Going back up or repeating a level is never a skip.
pub fn heading_skips(levels: &[u8]) -> Vec<(usize, String)> {
    levels
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[1] > pair[0] + 1)
        .map(|(i, pair)| (i + 1, format!("H{} to H{}", pair[0], pair[1])))
        .collect()
}

/// Every heading-level skip on the page.
pub fn check_heading_hierarchy(page: &Page<'_>, _rules: &RuleSet) -> Vec<Defect> {
    let headings = heading_levels(page);
    let levels: Vec<u8> = headings.iter().map(|(_, l)| *l).collect();
    heading_skips(&levels)
        .into_iter()
        .map(|(i, skip)| Defect::at(headings[i].0, format!("heading level skip: {skip}")))
        .collect()
}

/// No placeholder copy anywhere in the rendered text.
pub fn check_placeholder_text(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let text = page.doc.document_text();
    let found = rules.find_placeholders(&text);
    if found.is_empty() {
        Vec::new()
    } else {
        vec![Defect::page(format!(
            "placeholder text found: {}",
            found
                .iter()
                .map(|p| format!("\"{p}\""))
                .collect::<Vec<_>>()
                .join(", ")
        ))]
    }
}

/// Rendered text in `<main>`, else `<article>`, else `<body>` meets the
/// minimum length.
pub fn check_min_length(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let doc = page.doc;
    let Some(region) = doc
        .find_first("main")
        .or_else(|| doc.find_first("article"))
        .or_else(|| doc.find_first("body"))
    else {
        return Vec::new();
    };
    let len = doc.text(region).chars().count();
    if len < rules.min_content_chars {
        vec![Defect::page(format!(
            "only {len} characters of content in <{}> (minimum {})",
            doc.element(region).tag,
            rules.min_content_chars
        ))]
    } else {
        Vec::new()
    }
}

/// Whether `title` is generic: the whole title, or any segment around a
/// ` | `, ` - `, ` – ` or ` — ` separator, equals a denylisted title.
pub fn is_generic_title(title: &str, generic: &[String]) -> bool {
    let matches = |s: &str| generic.iter().any(|g| g.eq_ignore_ascii_case(s.trim()));
    if matches(title) {
        return true;
    }
    let mut segments = vec![title];
    for sep in [" | ", " - ", " \u{2013} ", " \u{2014} "] {
        segments = segments.into_iter().flat_map(|s| s.split(sep)).collect();
    }
    segments.len() > 1 && segments.into_iter().any(matches)
}

/// Titles meet the minimum length and are not generic.
pub fn check_title_descriptive(page: &Page<'_>, rules: &RuleSet) -> Vec<Defect> {
    let Some(title) = page_title_text(page.doc) else {
        return Vec::new();
    };
    if title.is_empty() {
        return Vec::new();
    }
    let len = title.chars().count();
    if len < rules.title_min {
        vec![Defect::page(format!(
            "title \"{title}\" too short ({len} chars, minimum {})",
            rules.title_min
        ))]
    } else if is_generic_title(&title, &rules.generic_titles) {
        vec![Defect::page(format!("title \"{title}\" is generic"))]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_skip_sequences() {
        assert_eq!(
            heading_skips(&[1, 2, 4]).into_iter().map(|(_, s)| s).collect::<Vec<_>>(),
            vec!["H2 to H4"]
        );
        assert!(heading_skips(&[1, 2, 3, 2, 3]).is_empty());
        assert_eq!(
            heading_skips(&[1, 3]).into_iter().map(|(_, s)| s).collect::<Vec<_>>(),
            vec!["H1 to H3"]
        );
        assert!(heading_skips(&[1, 1, 2, 2, 1]).is_empty());
        assert_eq!(heading_skips(&[1, 3, 2, 4]).len(), 2);
        assert!(heading_skips(&[]).is_empty());
    }

    #[test]
    fn generic_titles() {
        let generic: Vec<String> = ["Untitled", "New Page", "Page", "Home"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(is_generic_title("Home", &generic));
        assert!(is_generic_title("Home | My Site", &generic));
        assert!(is_generic_title("untitled - Blog", &generic));
        assert!(!is_generic_title("Homebrew tips for macOS", &generic));
        assert!(!is_generic_title("Paged memory allocators", &generic));
        assert!(!is_generic_title("My Site", &generic));
    }
}
