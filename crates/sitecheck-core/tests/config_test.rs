//! Tests for the sitecheck configuration system.

use std::sync::Mutex;

use sitecheck_core::config::{CliOverrides, SitecheckConfig};
use sitecheck_core::errors::{ConfigError, SitecheckErrorCode};

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper: create a temporary directory.
fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all SITECHECK_ env vars and point HOME at an empty directory so a
/// developer's user config cannot leak into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "SITECHECK_CORPUS_ROOT",
        "SITECHECK_CORPUS_MATCH",
        "SITECHECK_VALIDATOR_TIMEOUT_SECS",
        "SITECHECK_LINK_CHECKER_TIMEOUT_SECS",
        "SITECHECK_REPORT_FORMAT",
        "SITECHECK_FAIL_ON_ADVISORY",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_defaults_without_any_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = SitecheckConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.corpus.effective_root(), "public");
    assert_eq!(config.corpus.effective_match(), "*.html");
    assert_eq!(config.corpus.effective_static_prefixes(), vec!["plasma"]);
    assert_eq!(
        config.corpus.effective_taxonomy_segments(),
        vec!["categories", "tags"]
    );
    assert_eq!(config.content.effective_description_min(), 50);
    assert_eq!(config.content.effective_description_max(), 160);
    assert_eq!(config.content.effective_title_min(), 10);
    assert_eq!(config.content.effective_min_content_chars(), 100);
    assert_eq!(config.validators.effective_link_checker_timeout_secs(), 30);
    assert_eq!(config.validators.effective_probe_timeout_secs(), 10);
    assert_eq!(config.report.effective_format(), "console");
    assert!(!config.report.effective_fail_on_advisory());
    assert_eq!(config.corpus_root(dir.path()), dir.path().join("public"));
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    // User config: lowest file layer.
    std::fs::create_dir_all(home.path().join(".sitecheck")).unwrap();
    std::fs::write(
        home.path().join(".sitecheck/config.toml"),
        r#"
[content]
title_min = 5
description_max = 150
"#,
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("sitecheck.toml"),
        r#"
[corpus]
root = "dist"
static_prefixes = ["demos", "plasma"]

[content]
description_max = 155

[report]
format = "json"
"#,
    )
    .unwrap();

    std::env::set_var("SITECHECK_CORPUS_ROOT", "out");
    std::env::set_var("SITECHECK_FAIL_ON_ADVISORY", "true");

    let cli = CliOverrides {
        report_format: Some("junit".to_string()),
        ..Default::default()
    };
    let config = SitecheckConfig::load(dir.path(), Some(&cli)).unwrap();

    // User layer survives where nothing overrides it.
    assert_eq!(config.content.effective_title_min(), 5);
    // Project overrides user.
    assert_eq!(config.content.effective_description_max(), 155);
    assert_eq!(
        config.corpus.effective_static_prefixes(),
        vec!["demos", "plasma"]
    );
    // Env overrides project.
    assert_eq!(config.corpus.effective_root(), "out");
    assert!(config.report.effective_fail_on_advisory());
    // CLI overrides everything.
    assert_eq!(config.report.effective_format(), "junit");

    isolate_env(home.path());
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("sitecheck.toml"), "this is not [valid toml").unwrap();

    match SitecheckConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { path, .. }) => assert!(path.ends_with("sitecheck.toml")),
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_description_bounds_validated() {
    let config = SitecheckConfig::from_toml(
        r#"
[content]
description_min = 200
description_max = 160
"#,
    )
    .unwrap();
    let err = SitecheckConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "content.description_min"));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_zero_timeout_rejected() {
    let config = SitecheckConfig::from_toml(
        r#"
[validators]
link_checker_timeout_secs = 0
"#,
    )
    .unwrap();
    let err = SitecheckConfig::validate(&config).unwrap_err();
    assert!(err.to_string().contains("validators.link_checker_timeout_secs"));
}

#[test]
fn test_unknown_report_format_rejected() {
    let config = SitecheckConfig::from_toml("[report]\nformat = \"sarif\"\n").unwrap();
    assert!(matches!(
        SitecheckConfig::validate(&config),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_match_key_renamed() {
    let config = SitecheckConfig::from_toml("[corpus]\nmatch = \"**/*.htm\"\n").unwrap();
    assert_eq!(config.corpus.effective_match(), "**/*.htm");
}

#[test]
fn test_toml_roundtrip() {
    let config = SitecheckConfig::from_toml(
        r#"
[corpus]
root = "site"

[validators]
link_checker = "lychee"
"#,
    )
    .unwrap();
    let serialized = config.to_toml().unwrap();
    let reparsed = SitecheckConfig::from_toml(&serialized).unwrap();
    assert_eq!(reparsed.corpus.effective_root(), "site");
    assert_eq!(reparsed.validators.effective_link_checker(), "lychee");
}

#[test]
fn test_absolute_corpus_root_kept() {
    let dir = tempdir();
    let abs = dir.path().join("elsewhere");
    let config = SitecheckConfig::from_toml(&format!(
        "[corpus]\nroot = {:?}\n",
        abs.display().to_string()
    ))
    .unwrap();
    assert_eq!(config.corpus_root(std::path::Path::new("/ignored")), abs);
}
