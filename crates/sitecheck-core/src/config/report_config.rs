//! Report output configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// "console" | "json" | "junit". Default: "console".
    pub format: Option<String>,
    /// Treat advisory warnings as failures. Default: false.
    pub fail_on_advisory: Option<bool>,
    /// Colorize console output. Default: true.
    pub color: Option<bool>,
}

impl ReportConfig {
    pub fn effective_format(&self) -> &str {
        self.format
            .as_deref()
            .unwrap_or(constants::DEFAULT_REPORT_FORMAT)
    }

    pub fn effective_fail_on_advisory(&self) -> bool {
        self.fail_on_advisory.unwrap_or(false)
    }

    pub fn effective_color(&self) -> bool {
        self.color.unwrap_or(true)
    }
}
