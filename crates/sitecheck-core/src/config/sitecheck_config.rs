//! Top-level sitecheck configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    AssetConfig, ContentConfig, CorpusConfig, MetadataConfig, ReportConfig,
    StructuredDataConfig, ValidatorConfig,
};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SITECHECK_*`)
/// 3. Project config (`sitecheck.toml` in project root)
/// 4. User config (`~/.sitecheck/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SitecheckConfig {
    pub corpus: CorpusConfig,
    pub content: ContentConfig,
    pub metadata: MetadataConfig,
    pub structured_data: StructuredDataConfig,
    pub validators: ValidatorConfig,
    pub assets: AssetConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub corpus_root: Option<String>,
    pub corpus_match: Option<String>,
    pub report_format: Option<String>,
    pub fail_on_advisory: Option<bool>,
    pub color: Option<bool>,
}

impl SitecheckConfig {
    /// Load configuration with layered resolution.
    ///
    /// Resolution order (highest priority first):
    /// 1. CLI flags
    /// 2. Environment variables (`SITECHECK_*`)
    /// 3. Project config (`sitecheck.toml` in `root`)
    /// 4. User config (`~/.sitecheck/config.toml`)
    /// 5. Compiled defaults
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "loaded project config");
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SitecheckConfig) -> Result<(), ConfigError> {
        let min = config.content.effective_description_min();
        let max = config.content.effective_description_max();
        if min > max {
            return Err(ConfigError::ValidationFailed {
                field: "content.description_min".to_string(),
                message: format!("must not exceed content.description_max ({max})"),
            });
        }
        if config.corpus.effective_match().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "corpus.match".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        for (field, value) in [
            (
                "validators.html_validator_timeout_secs",
                config.validators.html_validator_timeout_secs,
            ),
            (
                "validators.link_checker_timeout_secs",
                config.validators.link_checker_timeout_secs,
            ),
            (
                "validators.probe_timeout_secs",
                config.validators.probe_timeout_secs,
            ),
        ] {
            if value == Some(0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        let format = config.report.effective_format();
        if !["console", "json", "junit"].contains(&format) {
            return Err(ConfigError::InvalidValue {
                field: "report.format".to_string(),
                message: format!("unknown format '{format}' (expected console, json, or junit)"),
            });
        }
        Ok(())
    }

    /// Corpus directory resolved against the project root.
    pub fn corpus_root(&self, project_root: &Path) -> PathBuf {
        self.corpus.resolve_root(project_root)
    }

    /// Returns the user config path: `~/.sitecheck/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut SitecheckConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SitecheckConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value or a non-empty list.
    fn merge(base: &mut SitecheckConfig, other: &SitecheckConfig) {
        // Corpus
        if other.corpus.root.is_some() {
            base.corpus.root = other.corpus.root.clone();
        }
        if other.corpus.match_glob.is_some() {
            base.corpus.match_glob = other.corpus.match_glob.clone();
        }
        if !other.corpus.static_prefixes.is_empty() {
            base.corpus.static_prefixes = other.corpus.static_prefixes.clone();
        }
        if !other.corpus.taxonomy_segments.is_empty() {
            base.corpus.taxonomy_segments = other.corpus.taxonomy_segments.clone();
        }
        if !other.corpus.blog_sections.is_empty() {
            base.corpus.blog_sections = other.corpus.blog_sections.clone();
        }

        // Content
        if other.content.description_min.is_some() {
            base.content.description_min = other.content.description_min;
        }
        if other.content.description_max.is_some() {
            base.content.description_max = other.content.description_max;
        }
        if other.content.title_min.is_some() {
            base.content.title_min = other.content.title_min;
        }
        if other.content.min_content_chars.is_some() {
            base.content.min_content_chars = other.content.min_content_chars;
        }
        if !other.content.generic_titles.is_empty() {
            base.content.generic_titles = other.content.generic_titles.clone();
        }
        if !other.content.placeholder_phrases.is_empty() {
            base.content.placeholder_phrases = other.content.placeholder_phrases.clone();
        }
        if !other.content.non_descriptive_link_text.is_empty() {
            base.content.non_descriptive_link_text =
                other.content.non_descriptive_link_text.clone();
        }
        if !other.content.decorative_alt_words.is_empty() {
            base.content.decorative_alt_words = other.content.decorative_alt_words.clone();
        }

        // Metadata
        if !other.metadata.og_required.is_empty() {
            base.metadata.og_required = other.metadata.og_required.clone();
        }
        if !other.metadata.og_types.is_empty() {
            base.metadata.og_types = other.metadata.og_types.clone();
        }
        if !other.metadata.twitter_required.is_empty() {
            base.metadata.twitter_required = other.metadata.twitter_required.clone();
        }
        if !other.metadata.twitter_cards.is_empty() {
            base.metadata.twitter_cards = other.metadata.twitter_cards.clone();
        }

        // Structured data
        if !other.structured_data.website_required.is_empty() {
            base.structured_data.website_required =
                other.structured_data.website_required.clone();
        }
        if !other.structured_data.article_required.is_empty() {
            base.structured_data.article_required =
                other.structured_data.article_required.clone();
        }
        if !other.structured_data.article_recommended.is_empty() {
            base.structured_data.article_recommended =
                other.structured_data.article_recommended.clone();
        }

        // Validators
        if other.validators.html_validator.is_some() {
            base.validators.html_validator = other.validators.html_validator.clone();
        }
        if !other.validators.html_validator_args.is_empty() {
            base.validators.html_validator_args = other.validators.html_validator_args.clone();
        }
        if other.validators.html_validator_timeout_secs.is_some() {
            base.validators.html_validator_timeout_secs =
                other.validators.html_validator_timeout_secs;
        }
        if other.validators.link_checker.is_some() {
            base.validators.link_checker = other.validators.link_checker.clone();
        }
        if other.validators.link_checker_timeout_secs.is_some() {
            base.validators.link_checker_timeout_secs =
                other.validators.link_checker_timeout_secs;
        }
        if other.validators.link_checker_config.is_some() {
            base.validators.link_checker_config = other.validators.link_checker_config.clone();
        }
        if other.validators.http_client.is_some() {
            base.validators.http_client = other.validators.http_client.clone();
        }
        if other.validators.probe_timeout_secs.is_some() {
            base.validators.probe_timeout_secs = other.validators.probe_timeout_secs;
        }
        if other.validators.browser_user_agent.is_some() {
            base.validators.browser_user_agent = other.validators.browser_user_agent.clone();
        }
        if other.validators.bot_user_agent.is_some() {
            base.validators.bot_user_agent = other.validators.bot_user_agent.clone();
        }

        // Assets
        if other.assets.email_scrambler.is_some() {
            base.assets.email_scrambler = other.assets.email_scrambler.clone();
        }
        if other.assets.theme_init.is_some() {
            base.assets.theme_init = other.assets.theme_init.clone();
        }
        if other.assets.theme_toggle.is_some() {
            base.assets.theme_toggle = other.assets.theme_toggle.clone();
        }
        if other.assets.stylesheet.is_some() {
            base.assets.stylesheet = other.assets.stylesheet.clone();
        }
        if !other.assets.scramble_samples.is_empty() {
            base.assets.scramble_samples = other.assets.scramble_samples.clone();
        }

        // Report
        if other.report.format.is_some() {
            base.report.format = other.report.format.clone();
        }
        if other.report.fail_on_advisory.is_some() {
            base.report.fail_on_advisory = other.report.fail_on_advisory;
        }
        if other.report.color.is_some() {
            base.report.color = other.report.color;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SITECHECK_CORPUS_ROOT`, `SITECHECK_REPORT_FORMAT`, etc.
    fn apply_env_overrides(config: &mut SitecheckConfig) {
        if let Ok(val) = std::env::var("SITECHECK_CORPUS_ROOT") {
            config.corpus.root = Some(val);
        }
        if let Ok(val) = std::env::var("SITECHECK_CORPUS_MATCH") {
            config.corpus.match_glob = Some(val);
        }
        if let Ok(val) = std::env::var("SITECHECK_VALIDATOR_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.validators.html_validator_timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SITECHECK_LINK_CHECKER_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.validators.link_checker_timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SITECHECK_REPORT_FORMAT") {
            config.report.format = Some(val);
        }
        if let Ok(val) = std::env::var("SITECHECK_FAIL_ON_ADVISORY") {
            if let Ok(v) = val.parse::<bool>() {
                config.report.fail_on_advisory = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SitecheckConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.corpus_root {
            config.corpus.root = Some(v.clone());
        }
        if let Some(ref v) = cli.corpus_match {
            config.corpus.match_glob = Some(v.clone());
        }
        if let Some(ref v) = cli.report_format {
            config.report.format = Some(v.clone());
        }
        if let Some(v) = cli.fail_on_advisory {
            config.report.fail_on_advisory = Some(v);
        }
        if let Some(v) = cli.color {
            config.report.color = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.sitecheck/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".sitecheck"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
