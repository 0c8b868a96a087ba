//! External validator configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Commands, timeouts, and client identities for the out-of-process checks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidatorConfig {
    /// HTML conformance checker program. Default: "html5validator".
    pub html_validator: Option<String>,
    /// Extra arguments appended after the generated root/match/blacklist flags.
    #[serde(default)]
    pub html_validator_args: Vec<String>,
    /// Default: 120 seconds.
    pub html_validator_timeout_secs: Option<u64>,
    /// Link/asset checker program, run from the project root. Default: "htmltest".
    pub link_checker: Option<String>,
    /// Default: 30 seconds.
    pub link_checker_timeout_secs: Option<u64>,
    /// Link checker config holding `IgnoreURLs`. Default: ".htmltest.yml".
    pub link_checker_config: Option<String>,
    /// Command-line HTTP client used for ignore-list probes. Default: "curl".
    pub http_client: Option<String>,
    /// Per-URL probe timeout. Default: 10 seconds.
    pub probe_timeout_secs: Option<u64>,
    pub browser_user_agent: Option<String>,
    pub bot_user_agent: Option<String>,
}

impl ValidatorConfig {
    pub fn effective_html_validator(&self) -> &str {
        self.html_validator
            .as_deref()
            .unwrap_or(constants::DEFAULT_HTML_VALIDATOR)
    }

    pub fn effective_html_validator_timeout_secs(&self) -> u64 {
        self.html_validator_timeout_secs
            .unwrap_or(constants::DEFAULT_HTML_VALIDATOR_TIMEOUT_SECS)
    }

    pub fn effective_link_checker(&self) -> &str {
        self.link_checker
            .as_deref()
            .unwrap_or(constants::DEFAULT_LINK_CHECKER)
    }

    pub fn effective_link_checker_timeout_secs(&self) -> u64 {
        self.link_checker_timeout_secs
            .unwrap_or(constants::DEFAULT_LINK_CHECKER_TIMEOUT_SECS)
    }

    pub fn effective_link_checker_config(&self) -> &str {
        self.link_checker_config
            .as_deref()
            .unwrap_or(constants::DEFAULT_LINK_CHECKER_CONFIG)
    }

    pub fn effective_http_client(&self) -> &str {
        self.http_client
            .as_deref()
            .unwrap_or(constants::DEFAULT_HTTP_CLIENT)
    }

    pub fn effective_probe_timeout_secs(&self) -> u64 {
        self.probe_timeout_secs
            .unwrap_or(constants::DEFAULT_PROBE_TIMEOUT_SECS)
    }

    pub fn effective_browser_user_agent(&self) -> &str {
        self.browser_user_agent
            .as_deref()
            .unwrap_or(constants::DEFAULT_BROWSER_USER_AGENT)
    }

    pub fn effective_bot_user_agent(&self) -> &str {
        self.bot_user_agent
            .as_deref()
            .unwrap_or(constants::DEFAULT_BOT_USER_AGENT)
    }
}
