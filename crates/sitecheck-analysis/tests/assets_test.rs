//! Embedded asset rule and scramble round-trip tests.

mod common;

use common::SiteFixture;
use sitecheck_analysis::assets::{scramble, unscramble, AssetChecks, AssetKind};
use sitecheck_analysis::enforcement::CheckStatus;
use sitecheck_core::config::AssetConfig;

const EMAIL_SCRAMBLER: &str = r#"
/**
 * Scramble an address.
 * @param {string} email
 * @returns {string}
 */
function scrambleEmail(email) { return email; }

/**
 * @param {string} scrambled
 * @returns {Promise<string>}
 */
async function unscrambleEmail(scrambled) { return scrambled; }

function setupEmailReveal() {
  const link = document.createElement("a");
  link.textContent = "Reveal email";
  document.body.appendChild(link);
}

module.exports = { scrambleEmail, unscrambleEmail };
"#;

const THEME_INIT: &str = r#"
try {
  const t = localStorage.getItem("theme-preference");
  if (t) document.documentElement.setAttribute("data-theme", t);
} catch (e) {}
"#;

const THEME_TOGGLE: &str = r#"
const KEY = "theme-preference";
const mq = window.matchMedia("(prefers-color-scheme: dark)");
mq.addEventListener("change", apply);
button.setAttribute("aria-label", "Toggle theme");
button.textContent = "Theme";
localStorage.removeItem(KEY);
"#;

const STYLESHEET: &str = r#"
[data-theme="light"] { --bg: #fff; }
[data-theme="dark"] { --bg: #000; }
.theme-toggle-btn { border: 0; }
.theme-toggle-btn:focus-visible { outline: 2px solid; }
@media (prefers-color-scheme: dark) { :root:not([data-theme]) { --bg: #000; } }
"#;

fn site_with_assets() -> SiteFixture {
    let site = SiteFixture::new();
    site.file("static/js/email-scrambler.js", EMAIL_SCRAMBLER);
    site.file("static/js/theme-init.js", THEME_INIT);
    site.file("static/js/theme-toggle.js", THEME_TOGGLE);
    site.file("assets/css/main.css", STYLESHEET);
    site
}

#[test]
fn well_formed_assets_pass() {
    let site = site_with_assets();
    let results = AssetChecks::new(site.project(), &AssetConfig::default()).run_all();
    assert_eq!(results.len(), 5);
    for r in &results {
        assert_eq!(r.status, CheckStatus::Passed, "{}", r.failure_report());
    }
    let ids: Vec<&str> = results.iter().map(|r| r.check_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "assets/email-scrambler",
            "assets/theme-init",
            "assets/theme-toggle",
            "assets/stylesheet",
            "assets/scrambler-roundtrip",
        ]
    );
}

#[test]
fn unsafe_dom_usage_is_flagged() {
    let site = site_with_assets();
    site.file(
        "static/js/theme-toggle.js",
        &format!("{THEME_TOGGLE}\nbutton.innerHTML = icon;\neval(code);\n"),
    );
    let result = AssetChecks::new(site.project(), &AssetConfig::default()).check(AssetKind::ThemeToggle);
    assert_eq!(result.status, CheckStatus::Failed);
    let messages: Vec<&str> = result.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("contains `eval(`"));
    assert!(messages[1].starts_with("contains `innerHTML`"));
    assert!(result.violations.iter().all(|v| v.file == "static/js/theme-toggle.js"));
}

#[test]
fn single_quoted_attribute_calls_are_accepted() {
    let site = site_with_assets();
    site.file("static/js/theme-init.js", &THEME_INIT.replace('"', "'"));
    let result = AssetChecks::new(site.project(), &AssetConfig::default()).check(AssetKind::ThemeInit);
    assert_eq!(result.status, CheckStatus::Passed);
}

#[test]
fn missing_asset_is_one_violation() {
    let site = SiteFixture::new();
    let result = AssetChecks::new(site.project(), &AssetConfig::default()).check(AssetKind::EmailScrambler);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].file, "static/js/email-scrambler.js");
}

#[test]
fn asset_paths_come_from_config() {
    let site = site_with_assets();
    site.file("theme/main.css", STYLESHEET);
    std::fs::remove_file(site.project().join("assets/css/main.css")).unwrap();
    let config = AssetConfig {
        stylesheet: Some("theme/main.css".to_string()),
        ..Default::default()
    };
    let result = AssetChecks::new(site.project(), &config).check(AssetKind::Stylesheet);
    assert_eq!(result.status, CheckStatus::Passed);
}

// ─── Scramble round-trip ────────────────────────────────────────────────

#[test]
fn scramble_matches_known_outputs() {
    assert_eq!(scramble("test@example.com"), "ttxp.mm@scaeleoe");
    assert_eq!(unscramble("ttxp.mm@scaeleoe"), "test@example.com");
    assert_eq!(scramble("hello@world.dev"), "hlwld@eedlroo.v");
}

#[test]
fn configured_samples_must_round_trip_and_change() {
    let site = SiteFixture::new();
    let config = AssetConfig {
        scramble_samples: vec!["someone@example.net".to_string(), "a@b".to_string()],
        ..Default::default()
    };
    let result = AssetChecks::new(site.project(), &config).scrambler_round_trip();
    assert_eq!(result.status, CheckStatus::Passed);
    assert_eq!(result.documents_checked, 2);
}
