//! Path-based exemption rules.
//!
//! Exemptions are never a global skip. Each predicate names the categories
//! it honors, and a document exempt from content rules is still held to the
//! structural ones.

use std::fmt;

use serde::{Deserialize, Serialize};
use sitecheck_core::config::CorpusConfig;

/// Categories of documents that may opt out of a predicate class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExemptionCategory {
    /// Interactive/demo content under an allow-listed top-level subtree.
    StaticContent,
    /// Listing pages generated for categories and tags.
    TaxonomyListing,
}

impl ExemptionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaticContent => "static-content",
            Self::TaxonomyListing => "taxonomy-listing",
        }
    }
}

impl fmt::Display for ExemptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static exemption configuration: a prefix allow-list and reserved segments.
#[derive(Debug, Clone, Default)]
pub struct ExemptionRules {
    static_prefixes: Vec<Vec<String>>,
    taxonomy_segments: Vec<String>,
}

impl ExemptionRules {
    /// `static_prefixes` may name nested subtrees (`"demos/plasma"`).
    pub fn new(static_prefixes: &[String], taxonomy_segments: &[String]) -> Self {
        Self {
            static_prefixes: static_prefixes
                .iter()
                .map(|p| split_path(p))
                .filter(|parts| !parts.is_empty())
                .collect(),
            taxonomy_segments: taxonomy_segments.to_vec(),
        }
    }

    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new(
            &config.effective_static_prefixes(),
            &config.effective_taxonomy_segments(),
        )
    }

    /// Whether the document at corpus-relative `rel_path` is exempt from
    /// predicates that honor `category`.
    pub fn is_exempt(&self, rel_path: &str, category: ExemptionCategory) -> bool {
        match category {
            ExemptionCategory::StaticContent => self.is_static_file(rel_path),
            ExemptionCategory::TaxonomyListing => self.is_taxonomy_page(rel_path),
        }
    }

    /// Whether any of `categories` exempts `rel_path`.
    pub fn is_exempt_any(&self, rel_path: &str, categories: &[ExemptionCategory]) -> bool {
        categories.iter().any(|c| self.is_exempt(rel_path, *c))
    }

    /// Strict component-wise prefix match: `plasma/demo.html` is static,
    /// `plasmaworks/index.html` and `writing/my-plasma-article/` are not.
    pub fn is_static_file(&self, rel_path: &str) -> bool {
        let parts = split_path(rel_path);
        self.static_prefixes
            .iter()
            .any(|prefix| parts.len() > prefix.len() && parts.starts_with(prefix))
    }

    /// Any directory component equals a reserved taxonomy segment.
    pub fn is_taxonomy_page(&self, rel_path: &str) -> bool {
        let parts = split_path(rel_path);
        let dirs = &parts[..parts.len().saturating_sub(1)];
        dirs.iter()
            .any(|d| self.taxonomy_segments.iter().any(|s| s == d))
    }

    /// Static prefixes as configured, for tools that take an exclusion list.
    pub fn static_prefixes(&self) -> Vec<String> {
        self.static_prefixes.iter().map(|p| p.join("/")).collect()
    }
}

fn split_path(p: &str) -> Vec<String> {
    p.split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}
