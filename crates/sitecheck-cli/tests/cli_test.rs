//! End-to-end tests of the `sitecheck` binary.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Example Site: Notes on Building Things</title>
  <meta name="description" content="A practical walkthrough of how this static site is generated, checked, and published.">
  <link rel="canonical" href="https://example.com/">
  <meta property="og:title" content="Example Site">
  <meta property="og:description" content="How this static site is generated and checked.">
  <meta property="og:type" content="website">
  <meta property="og:url" content="https://example.com/">
  <meta name="twitter:card" content="summary">
  <meta name="twitter:title" content="Example Site">
  <meta name="twitter:description" content="How this static site is generated and checked.">
  <script type="application/ld+json">{"@context": "https://schema.org", "@type": "WebSite", "name": "Example Site", "url": "https://example.com/"}</script>
</head>
<body>
  <nav><a href="/about/">About this site</a></nav>
  <main>
    <h1>Notes on Building Things</h1>
    <p>This page explains how the site is built, which tools render it, and where the source
       for every article lives. It is long enough to count as real content.</p>
  </main>
</body>
</html>
"#;

/// Run the binary with a clean environment: no user config, no overrides.
fn sitecheck(home: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sitecheck"));
    cmd.args(args)
        .env("HOME", home)
        .env_remove("USERPROFILE")
        .env("SITECHECK_LOG", "error");
    for key in [
        "SITECHECK_CORPUS_ROOT",
        "SITECHECK_CORPUS_MATCH",
        "SITECHECK_VALIDATOR_TIMEOUT_SECS",
        "SITECHECK_LINK_CHECKER_TIMEOUT_SECS",
        "SITECHECK_REPORT_FORMAT",
        "SITECHECK_FAIL_ON_ADVISORY",
    ] {
        cmd.env_remove(key);
    }
    cmd.output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn project_with_homepage() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("public")).unwrap();
    std::fs::write(dir.path().join("public/index.html"), PAGE).unwrap();
    dir
}

#[test]
fn scramble_and_reverse() {
    let home = TempDir::new().unwrap();
    let out = sitecheck(home.path(), &["scramble", "test@example.com"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "ttxp.mm@scaeleoe");

    let out = sitecheck(home.path(), &["scramble", "--reverse", "ttxp.mm@scaeleoe"]);
    assert_eq!(stdout(&out).trim(), "test@example.com");
}

#[test]
fn list_shows_the_catalog() {
    let home = TempDir::new().unwrap();
    let out = sitecheck(home.path(), &["list"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.lines().next().unwrap().starts_with("structure/doctype"));
    assert!(text.contains("content/unique-titles"));
    assert!(text.contains("advisory"));
}

#[test]
fn missing_corpus_exits_with_precondition_code() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    let out = sitecheck(
        home.path(),
        &["--project", project.path().to_str().unwrap(), "check"],
    );
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("[CORPUS_NOT_FOUND]"));
}

#[test]
fn unknown_check_id_is_rejected() {
    let home = TempDir::new().unwrap();
    let project = project_with_homepage();
    let out = sitecheck(
        home.path(),
        &["--project", project.path().to_str().unwrap(), "check", "--only", "nope/none"],
    );
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("[UNKNOWN_CHECK]"));
}

#[test]
fn clean_corpus_passes() {
    let home = TempDir::new().unwrap();
    let project = project_with_homepage();
    let out = sitecheck(
        home.path(),
        &["--project", project.path().to_str().unwrap(), "--no-color", "check", "--no-assets"],
    );
    let text = stdout(&out);
    assert_eq!(out.status.code(), Some(0), "{text}");
    assert!(text.ends_with("Result: PASSED ✓\n"));
}

#[test]
fn violations_fail_the_run_with_json_output() {
    let home = TempDir::new().unwrap();
    let project = project_with_homepage();
    std::fs::write(
        project.path().join("public/broken.html"),
        "<html><body><p>Lorem ipsum</p></body></html>",
    )
    .unwrap();
    let out = sitecheck(
        home.path(),
        &[
            "--project",
            project.path().to_str().unwrap(),
            "--format",
            "json",
            "check",
            "--category",
            "structure",
            "--no-assets",
        ],
    );
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["overall_passed"], false);
    assert_eq!(value["check_count"], 7);
    assert_eq!(value["checks"][0]["violations"][0]["file"], "broken.html");
}

#[test]
fn asset_checks_run_alongside_a_category_by_default() {
    let home = TempDir::new().unwrap();
    let project = project_with_homepage();
    let out = sitecheck(
        home.path(),
        &[
            "--project",
            project.path().to_str().unwrap(),
            "--format",
            "json",
            "check",
            "--category",
            "structure",
        ],
    );
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["check_count"], 12);
    let ids: Vec<&str> = value["checks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["check_id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"assets/stylesheet"));
    assert!(ids.contains(&"assets/scrambler-roundtrip"));
}
