//! JSON-LD schema requirements.

use serde::{Deserialize, Serialize};

use super::list_or_default;
use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StructuredDataConfig {
    /// Fields a homepage `WebSite` block must carry.
    #[serde(default)]
    pub website_required: Vec<String>,
    /// Fields a blog post `Article` block must carry.
    #[serde(default)]
    pub article_required: Vec<String>,
    /// Fields a blog post `Article` block should carry (advisory).
    #[serde(default)]
    pub article_recommended: Vec<String>,
}

impl StructuredDataConfig {
    pub fn effective_website_required(&self) -> Vec<String> {
        list_or_default(&self.website_required, constants::DEFAULT_WEBSITE_REQUIRED)
    }

    pub fn effective_article_required(&self) -> Vec<String> {
        list_or_default(&self.article_required, constants::DEFAULT_ARTICLE_REQUIRED)
    }

    pub fn effective_article_recommended(&self) -> Vec<String> {
        list_or_default(
            &self.article_recommended,
            constants::DEFAULT_ARTICLE_RECOMMENDED,
        )
    }
}
