//! Embedded script and stylesheet asset locations.

use serde::{Deserialize, Serialize};

use super::list_or_default;
use crate::constants;

/// Asset paths are relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssetConfig {
    pub email_scrambler: Option<String>,
    pub theme_init: Option<String>,
    pub theme_toggle: Option<String>,
    pub stylesheet: Option<String>,
    /// Addresses pushed through the scramble round-trip.
    #[serde(default)]
    pub scramble_samples: Vec<String>,
}

impl AssetConfig {
    pub fn effective_email_scrambler(&self) -> &str {
        self.email_scrambler
            .as_deref()
            .unwrap_or(constants::DEFAULT_EMAIL_SCRAMBLER_JS)
    }

    pub fn effective_theme_init(&self) -> &str {
        self.theme_init
            .as_deref()
            .unwrap_or(constants::DEFAULT_THEME_INIT_JS)
    }

    pub fn effective_theme_toggle(&self) -> &str {
        self.theme_toggle
            .as_deref()
            .unwrap_or(constants::DEFAULT_THEME_TOGGLE_JS)
    }

    pub fn effective_stylesheet(&self) -> &str {
        self.stylesheet
            .as_deref()
            .unwrap_or(constants::DEFAULT_MAIN_CSS)
    }

    pub fn effective_scramble_samples(&self) -> Vec<String> {
        list_or_default(&self.scramble_samples, constants::DEFAULT_SCRAMBLE_SAMPLES)
    }
}
