//! Configuration system for sitecheck.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod asset_config;
pub mod content_config;
pub mod corpus_config;
pub mod metadata_config;
pub mod report_config;
pub mod sitecheck_config;
pub mod structured_data_config;
pub mod validator_config;

pub use asset_config::AssetConfig;
pub use content_config::ContentConfig;
pub use corpus_config::CorpusConfig;
pub use metadata_config::MetadataConfig;
pub use report_config::ReportConfig;
pub use sitecheck_config::{CliOverrides, SitecheckConfig};
pub use structured_data_config::StructuredDataConfig;
pub use validator_config::ValidatorConfig;

/// Returns `list` as owned strings, or `defaults` when `list` is empty.
pub(crate) fn list_or_default(list: &[String], defaults: &[&str]) -> Vec<String> {
    if list.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        list.to_vec()
    }
}
