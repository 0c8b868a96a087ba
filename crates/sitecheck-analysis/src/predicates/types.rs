//! Predicate data types: Page, Defect, Finding, PredicateInfo, RuleSet.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use serde::Serialize;
use sitecheck_core::config::SitecheckConfig;
use sitecheck_core::constants::HOMEPAGE_PATH;
use sitecheck_core::errors::ConfigError;

use super::traits::{CheckMode, PageTarget, PredicateCategory};
use crate::exemptions::ExemptionCategory;
use crate::parsers::HtmlDocument;

/// A parsed document plus the path context needed to report on it.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Corpus-relative path.
    pub path: &'a str,
    pub doc: &'a HtmlDocument,
}

/// A single-document defect produced by a page check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    pub line: Option<u32>,
    pub message: String,
}

impl Defect {
    /// A defect of the page as a whole.
    pub fn page(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }

    /// A defect anchored at a source line.
    pub fn at(line: u32, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }
}

/// A defect attributed to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub file: String,
    pub line: Option<u32>,
    pub message: String,
}

/// Static metadata of one predicate: one row of the catalog.
#[derive(Debug, Clone)]
pub struct PredicateInfo {
    /// `category/name`, e.g. `structure/doctype`.
    pub id: &'static str,
    pub name: &'static str,
    pub category: PredicateCategory,
    pub mode: CheckMode,
    /// Exemption categories this predicate honors.
    pub exemptions: &'static [ExemptionCategory],
    pub target: PageTarget,
    /// When set, an empty target set is a violation with this message
    /// instead of a skip.
    pub missing_target: Option<&'static str>,
}

/// Resolved rule parameters, built once per session from the config.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub description_min: usize,
    pub description_max: usize,
    pub title_min: usize,
    pub min_content_chars: usize,
    pub generic_titles: Vec<String>,
    pub placeholder_phrases: Vec<String>,
    /// Lowercased.
    pub non_descriptive_link_text: Vec<String>,
    /// Lowercased.
    pub decorative_alt_words: Vec<String>,
    pub og_required: Vec<String>,
    pub og_types: Vec<String>,
    pub twitter_required: Vec<String>,
    pub twitter_cards: Vec<String>,
    pub website_required: Vec<String>,
    pub article_required: Vec<String>,
    pub article_recommended: Vec<String>,
    pub blog_sections: Vec<String>,
    placeholder_matcher: AhoCorasick,
}

impl RuleSet {
    pub fn from_config(config: &SitecheckConfig) -> Result<Self, ConfigError> {
        let content = &config.content;
        let placeholder_phrases = content.effective_placeholder_phrases();
        let placeholder_matcher = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostFirst)
            .build(&placeholder_phrases)
            .map_err(|e| ConfigError::InvalidValue {
                field: "content.placeholder_phrases".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            description_min: content.effective_description_min(),
            description_max: content.effective_description_max(),
            title_min: content.effective_title_min(),
            min_content_chars: content.effective_min_content_chars(),
            generic_titles: content.effective_generic_titles(),
            placeholder_phrases,
            non_descriptive_link_text: lowercase_all(content.effective_non_descriptive_link_text()),
            decorative_alt_words: lowercase_all(content.effective_decorative_alt_words()),
            og_required: config.metadata.effective_og_required(),
            og_types: config.metadata.effective_og_types(),
            twitter_required: config.metadata.effective_twitter_required(),
            twitter_cards: config.metadata.effective_twitter_cards(),
            website_required: config.structured_data.effective_website_required(),
            article_required: config.structured_data.effective_article_required(),
            article_recommended: config.structured_data.effective_article_recommended(),
            blog_sections: config.corpus.effective_blog_sections(),
            placeholder_matcher,
        })
    }

    /// Distinct placeholder phrases found in `text`, in order of first
    /// occurrence. Matching ignores ASCII case.
    pub fn find_placeholders(&self, text: &str) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        for m in self.placeholder_matcher.find_iter(text) {
            let phrase = self.placeholder_phrases[m.pattern().as_usize()].as_str();
            if !found.contains(&phrase) {
                found.push(phrase);
            }
        }
        found
    }

    /// Whether `rel_path` is a blog post: a page under a blog section whose
    /// file name is not `index.html`.
    pub fn is_blog_post(&self, rel_path: &str) -> bool {
        let parts: Vec<&str> = rel_path.split('/').collect();
        parts.len() >= 2
            && self.blog_sections.iter().any(|s| s == parts[0])
            && parts.last().is_some_and(|name| *name != HOMEPAGE_PATH)
    }

    /// Whether `rel_path` is in `target`'s document set.
    pub fn targets(&self, target: PageTarget, rel_path: &str) -> bool {
        match target {
            PageTarget::AllPages => true,
            PageTarget::Homepage => rel_path == HOMEPAGE_PATH,
            PageTarget::BlogPosts => self.is_blog_post(rel_path),
        }
    }
}

fn lowercase_all(list: Vec<String>) -> Vec<String> {
    list.into_iter().map(|s| s.to_lowercase()).collect()
}
