//! Content and accessibility rule parameters.

use serde::{Deserialize, Serialize};

use super::list_or_default;
use crate::constants;

/// Thresholds and phrase lists for the content, link, and accessibility rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContentConfig {
    /// Minimum meta description length. Default: 50.
    pub description_min: Option<usize>,
    /// Maximum meta description length. Default: 160.
    pub description_max: Option<usize>,
    /// Minimum title length. Default: 10.
    pub title_min: Option<usize>,
    /// Minimum rendered text in the main content region. Default: 100.
    pub min_content_chars: Option<usize>,
    #[serde(default)]
    pub generic_titles: Vec<String>,
    #[serde(default)]
    pub placeholder_phrases: Vec<String>,
    #[serde(default)]
    pub non_descriptive_link_text: Vec<String>,
    #[serde(default)]
    pub decorative_alt_words: Vec<String>,
}

impl ContentConfig {
    pub fn effective_description_min(&self) -> usize {
        self.description_min
            .unwrap_or(constants::DEFAULT_DESCRIPTION_MIN)
    }

    pub fn effective_description_max(&self) -> usize {
        self.description_max
            .unwrap_or(constants::DEFAULT_DESCRIPTION_MAX)
    }

    pub fn effective_title_min(&self) -> usize {
        self.title_min.unwrap_or(constants::DEFAULT_TITLE_MIN)
    }

    pub fn effective_min_content_chars(&self) -> usize {
        self.min_content_chars
            .unwrap_or(constants::DEFAULT_MIN_CONTENT_CHARS)
    }

    pub fn effective_generic_titles(&self) -> Vec<String> {
        list_or_default(&self.generic_titles, constants::DEFAULT_GENERIC_TITLES)
    }

    pub fn effective_placeholder_phrases(&self) -> Vec<String> {
        list_or_default(
            &self.placeholder_phrases,
            constants::DEFAULT_PLACEHOLDER_PHRASES,
        )
    }

    pub fn effective_non_descriptive_link_text(&self) -> Vec<String> {
        list_or_default(
            &self.non_descriptive_link_text,
            constants::DEFAULT_NON_DESCRIPTIVE_LINK_TEXT,
        )
    }

    pub fn effective_decorative_alt_words(&self) -> Vec<String> {
        list_or_default(
            &self.decorative_alt_words,
            constants::DEFAULT_DECORATIVE_ALT_WORDS,
        )
    }
}
