//! Social metadata allow-lists.

use serde::{Deserialize, Serialize};

use super::list_or_default;
use crate::constants;

/// Required properties and permitted values for Open Graph and Twitter Cards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetadataConfig {
    #[serde(default)]
    pub og_required: Vec<String>,
    #[serde(default)]
    pub og_types: Vec<String>,
    #[serde(default)]
    pub twitter_required: Vec<String>,
    #[serde(default)]
    pub twitter_cards: Vec<String>,
}

impl MetadataConfig {
    pub fn effective_og_required(&self) -> Vec<String> {
        list_or_default(&self.og_required, constants::DEFAULT_OG_REQUIRED)
    }

    pub fn effective_og_types(&self) -> Vec<String> {
        list_or_default(&self.og_types, constants::DEFAULT_OG_TYPES)
    }

    pub fn effective_twitter_required(&self) -> Vec<String> {
        list_or_default(&self.twitter_required, constants::DEFAULT_TWITTER_REQUIRED)
    }

    pub fn effective_twitter_cards(&self) -> Vec<String> {
        list_or_default(&self.twitter_cards, constants::DEFAULT_TWITTER_CARDS)
    }
}
