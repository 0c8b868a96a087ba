//! The declarative predicate catalog.
//!
//! Each row names a predicate, its mode, the exemption categories it honors
//! and the pages it targets. Order here is report order.

use super::accessibility as a11y;
use super::content;
use super::corpus_wide::UniqueTitles;
use super::links;
use super::metadata as meta;
use super::page_predicate::{PageCheck, PagePredicate};
use super::structure;
use super::structured_data as jsonld;
use super::traits::{CheckMode, PageTarget, Predicate, PredicateCategory};
use super::types::PredicateInfo;
use crate::exemptions::ExemptionCategory;

use CheckMode::{Advisory, Enforced};
use PageTarget::{AllPages, BlogPosts, Homepage};
use PredicateCategory::*;

const NONE: &[ExemptionCategory] = &[];
const STATIC: &[ExemptionCategory] = &[ExemptionCategory::StaticContent];
const STATIC_TAXONOMY: &[ExemptionCategory] = &[
    ExemptionCategory::StaticContent,
    ExemptionCategory::TaxonomyListing,
];

/// Message for a homepage predicate when `index.html` is absent.
pub const MISSING_HOMEPAGE: &str = "homepage index.html not found in the corpus";

struct Row {
    id: &'static str,
    name: &'static str,
    category: PredicateCategory,
    mode: CheckMode,
    exemptions: &'static [ExemptionCategory],
    target: PageTarget,
    check: PageCheck,
}

const fn row(
    id: &'static str,
    name: &'static str,
    category: PredicateCategory,
    mode: CheckMode,
    exemptions: &'static [ExemptionCategory],
    target: PageTarget,
    check: PageCheck,
) -> Row {
    Row {
        id,
        name,
        category,
        mode,
        exemptions,
        target,
        check,
    }
}

#[rustfmt::skip]
const PAGE_ROWS: &[Row] = &[
    row("structure/doctype", "DOCTYPE declaration", Structure, Enforced, NONE, AllPages, structure::check_doctype),
    row("structure/html-tag", "<html> element", Structure, Enforced, NONE, AllPages, structure::check_html_tag),
    row("structure/head-tag", "<head> element", Structure, Enforced, NONE, AllPages, structure::check_head_tag),
    row("structure/body-tag", "<body> element", Structure, Enforced, NONE, AllPages, structure::check_body_tag),
    row("structure/title", "Single non-empty title", Structure, Enforced, NONE, AllPages, structure::check_title),
    row("structure/lang", "Document language", Structure, Enforced, NONE, AllPages, structure::check_lang),
    row("structure/charset", "Character encoding", Structure, Enforced, NONE, AllPages, structure::check_charset),

    row("a11y/main-landmark", "Single main landmark", Accessibility, Enforced, STATIC, AllPages, a11y::check_main_landmark),
    row("a11y/nav-landmark", "Navigation landmark", Accessibility, Enforced, STATIC, AllPages, a11y::check_nav_landmark),
    row("a11y/form-labels", "Labelled form controls", Accessibility, Enforced, STATIC, AllPages, a11y::check_form_labels),
    row("a11y/button-names", "Named buttons", Accessibility, Enforced, STATIC, AllPages, a11y::check_button_names),
    row("a11y/positive-tabindex", "No positive tabindex", Accessibility, Enforced, NONE, AllPages, a11y::check_positive_tabindex),
    row("a11y/keyboard-access", "Keyboard-reachable click handlers", Accessibility, Enforced, NONE, AllPages, a11y::check_keyboard_access),
    row("a11y/decorative-alt", "Empty alt for decorative images", Accessibility, Advisory, NONE, AllPages, a11y::check_decorative_alt),

    row("links/descriptive-text", "Descriptive link text", Links, Enforced, NONE, AllPages, links::check_descriptive_text),
    row("links/external-marked", "External links marked", Links, Advisory, NONE, AllPages, links::check_external_marked),

    row("content/description-present", "Meta description present", Content, Enforced, STATIC_TAXONOMY, AllPages, content::check_description_present),
    row("content/description-length", "Meta description length", Content, Enforced, NONE, AllPages, content::check_description_length),
    row("content/single-h1", "Single H1", Content, Enforced, NONE, AllPages, content::check_single_h1),
    row("content/heading-hierarchy", "Heading hierarchy", Content, Enforced, NONE, AllPages, content::check_heading_hierarchy),
    row("content/placeholder-text", "No placeholder text", Content, Enforced, NONE, AllPages, content::check_placeholder_text),
    row("content/min-length", "Minimum content length", Content, Enforced, STATIC_TAXONOMY, AllPages, content::check_min_length),
    row("content/title-descriptive", "Descriptive title", Content, Enforced, STATIC, AllPages, content::check_title_descriptive),

    row("meta/canonical-present", "Canonical URL present", Metadata, Enforced, STATIC, AllPages, meta::check_canonical_present),
    row("meta/canonical-absolute", "Canonical URL absolute", Metadata, Enforced, STATIC, AllPages, meta::check_canonical_absolute),
    row("meta/open-graph", "Open Graph tags", Metadata, Enforced, STATIC, AllPages, meta::check_open_graph),
    row("meta/og-type", "Valid og:type", Metadata, Enforced, NONE, AllPages, meta::check_og_type),
    row("meta/twitter-card", "Twitter Card tags", Metadata, Enforced, STATIC, AllPages, meta::check_twitter_card),
    row("meta/twitter-card-type", "Valid twitter:card", Metadata, Enforced, NONE, AllPages, meta::check_twitter_card_type),

    row("jsonld/valid-json", "JSON-LD parses", StructuredData, Enforced, NONE, AllPages, jsonld::check_valid_json),
    row("jsonld/context", "JSON-LD @context", StructuredData, Enforced, NONE, AllPages, jsonld::check_context),
    row("jsonld/type", "JSON-LD @type", StructuredData, Enforced, NONE, AllPages, jsonld::check_type),
    row("jsonld/website-schema", "Homepage WebSite schema", StructuredData, Enforced, NONE, Homepage, jsonld::check_website_schema),
    row("jsonld/article-schema", "Blog post Article schema", StructuredData, Enforced, NONE, BlogPosts, jsonld::check_article_schema),
    row("jsonld/article-recommended", "Article recommended fields", StructuredData, Advisory, NONE, BlogPosts, jsonld::check_article_recommended),
];

fn info(row: &Row) -> PredicateInfo {
    PredicateInfo {
        id: row.id,
        name: row.name,
        category: row.category,
        mode: row.mode,
        exemptions: row.exemptions,
        target: row.target,
        missing_target: match row.target {
            Homepage => Some(MISSING_HOMEPAGE),
            AllPages | BlogPosts => None,
        },
    }
}

/// Every predicate, in report order.
pub fn default_catalog() -> Vec<Box<dyn Predicate>> {
    let mut catalog: Vec<Box<dyn Predicate>> = Vec::with_capacity(PAGE_ROWS.len() + 1);
    for row in PAGE_ROWS {
        catalog.push(Box::new(PagePredicate::new(info(row), row.check)));
        // Title uniqueness reports right after the per-page title checks.
        if row.id == "content/title-descriptive" {
            catalog.push(Box::new(UniqueTitles::new(PredicateInfo {
                id: "content/unique-titles",
                name: "Unique titles",
                category: Content,
                mode: Enforced,
                exemptions: NONE,
                target: AllPages,
                missing_target: None,
            })));
        }
    }
    catalog
}

/// Narrow the catalog. Empty filters select everything; otherwise a
/// predicate is kept when its category or its id is named.
pub fn select(
    catalog: Vec<Box<dyn Predicate>>,
    categories: &[PredicateCategory],
    ids: &[String],
) -> Vec<Box<dyn Predicate>> {
    if categories.is_empty() && ids.is_empty() {
        return catalog;
    }
    catalog
        .into_iter()
        .filter(|p| {
            categories.contains(&p.info().category) || ids.iter().any(|id| id == p.id())
        })
        .collect()
}

/// Look up one predicate by id.
pub fn find(id: &str) -> Option<Box<dyn Predicate>> {
    default_catalog().into_iter().find(|p| p.id() == id)
}
