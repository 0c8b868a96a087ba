//! String and pattern rules over the site's embedded scripts and stylesheet.

use std::path::Path;

use sitecheck_core::config::AssetConfig;

use crate::enforcement::{CheckResult, Severity, ViolationSink};

/// One requirement on an asset's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRule {
    /// The file exists. Checked implicitly for every asset; listing it only
    /// documents the requirement.
    Exists,
    Contains { needle: &'static str, reason: &'static str },
    NotContains { needle: &'static str, reason: &'static str },
    /// At least one of the needles occurs.
    AnyOf { needles: &'static [&'static str], reason: &'static str },
}

impl AssetRule {
    /// `None` when the rule holds for `content`.
    pub fn violation(&self, content: &str) -> Option<String> {
        match self {
            Self::Exists => None,
            Self::Contains { needle, reason } => {
                (!content.contains(needle)).then(|| format!("missing `{needle}`: {reason}"))
            }
            Self::NotContains { needle, reason } => {
                content.contains(needle).then(|| format!("contains `{needle}`: {reason}"))
            }
            Self::AnyOf { needles, reason } => (!needles.iter().any(|n| content.contains(n)))
                .then(|| format!("none of {}: {reason}", quote_all(needles))),
        }
    }
}

fn quote_all(needles: &[&str]) -> String {
    needles
        .iter()
        .map(|n| format!("`{n}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which configured asset a rule set applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    EmailScrambler,
    ThemeInit,
    ThemeToggle,
    Stylesheet,
}

impl AssetKind {
    pub fn check_id(&self) -> &'static str {
        match self {
            Self::EmailScrambler => "assets/email-scrambler",
            Self::ThemeInit => "assets/theme-init",
            Self::ThemeToggle => "assets/theme-toggle",
            Self::Stylesheet => "assets/stylesheet",
        }
    }

    /// Project-relative path from configuration.
    pub fn path<'a>(&self, config: &'a AssetConfig) -> &'a str {
        match self {
            Self::EmailScrambler => config.effective_email_scrambler(),
            Self::ThemeInit => config.effective_theme_init(),
            Self::ThemeToggle => config.effective_theme_toggle(),
            Self::Stylesheet => config.effective_stylesheet(),
        }
    }

    pub fn all() -> &'static [AssetKind] {
        &[
            Self::EmailScrambler,
            Self::ThemeInit,
            Self::ThemeToggle,
            Self::Stylesheet,
        ]
    }
}

const NO_INNER_HTML: &str = "innerHTML usage violates security standards";
const NO_EVAL: &str = "eval() usage violates security standards";
const SAFE_DOM: &str = "use textContent for safe DOM manipulation";

const EMAIL_SCRAMBLER_RULES: &[AssetRule] = &[
    AssetRule::Exists,
    AssetRule::Contains { needle: "function scrambleEmail", reason: "scrambleEmail must be defined" },
    AssetRule::Contains { needle: "async function unscrambleEmail", reason: "unscrambleEmail must be defined" },
    AssetRule::Contains { needle: "function setupEmailReveal", reason: "setupEmailReveal must be defined" },
    AssetRule::NotContains { needle: "innerHTML", reason: NO_INNER_HTML },
    AssetRule::NotContains { needle: "eval(", reason: NO_EVAL },
    AssetRule::Contains { needle: "textContent", reason: SAFE_DOM },
    AssetRule::Contains { needle: "createElement", reason: "use createElement for building DOM" },
    AssetRule::Contains { needle: "appendChild", reason: "use appendChild to add elements" },
    AssetRule::Contains { needle: "/**", reason: "functions need JSDoc comments" },
    AssetRule::Contains { needle: "@param", reason: "document parameters" },
    AssetRule::Contains { needle: "@returns", reason: "document return values" },
    AssetRule::Contains { needle: "module.exports", reason: "export functions for testing" },
];

const THEME_INIT_RULES: &[AssetRule] = &[
    AssetRule::Exists,
    AssetRule::Contains { needle: "localStorage.getItem", reason: "read the stored theme preference" },
    AssetRule::AnyOf {
        needles: &["setAttribute(\"data-theme\"", "setAttribute('data-theme'"],
        reason: "set the data-theme attribute",
    },
    AssetRule::AnyOf { needles: &["try", "catch"], reason: "handle localStorage exceptions" },
    AssetRule::NotContains { needle: "eval(", reason: NO_EVAL },
];

const THEME_TOGGLE_RULES: &[AssetRule] = &[
    AssetRule::Exists,
    AssetRule::NotContains { needle: "eval(", reason: NO_EVAL },
    AssetRule::NotContains { needle: "innerHTML", reason: NO_INNER_HTML },
    AssetRule::Contains { needle: "textContent", reason: SAFE_DOM },
    AssetRule::Contains { needle: "localStorage", reason: "persist the preference" },
    AssetRule::Contains { needle: "prefers-color-scheme", reason: "respect the system preference" },
    AssetRule::AnyOf {
        needles: &["addEventListener(\"change\"", "addEventListener('change'"],
        reason: "follow media query changes",
    },
    AssetRule::Contains { needle: "aria-label", reason: "label the toggle for assistive technology" },
    AssetRule::Contains { needle: "removeItem", reason: "clear storage when returning to the system preference" },
    AssetRule::Contains { needle: "theme-preference", reason: "use the shared storage key" },
];

const STYLESHEET_RULES: &[AssetRule] = &[
    AssetRule::Exists,
    AssetRule::Contains { needle: "[data-theme=\"light\"]", reason: "light theme override" },
    AssetRule::Contains { needle: "[data-theme=\"dark\"]", reason: "dark theme override" },
    AssetRule::Contains { needle: ".theme-toggle-btn", reason: "theme toggle button styles" },
    AssetRule::Contains { needle: ".theme-toggle-btn:focus-visible", reason: "visible focus for the toggle" },
    AssetRule::Contains {
        needle: "@media (prefers-color-scheme: dark)",
        reason: "keep system preference support without an override",
    },
];

pub fn rules_for(kind: AssetKind) -> &'static [AssetRule] {
    match kind {
        AssetKind::EmailScrambler => EMAIL_SCRAMBLER_RULES,
        AssetKind::ThemeInit => THEME_INIT_RULES,
        AssetKind::ThemeToggle => THEME_TOGGLE_RULES,
        AssetKind::Stylesheet => STYLESHEET_RULES,
    }
}

/// Evaluate `rules` against the text of one asset. A missing file is one
/// violation and no other rule is evaluated.
pub fn check_asset(check_id: &str, rel_path: &str, path: &Path, rules: &[AssetRule]) -> CheckResult {
    let mut sink = ViolationSink::new(check_id, Severity::Error);
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            sink.push(rel_path, None, "file does not exist");
            return CheckResult::fail(check_id, 1, sink.into_violations());
        }
        Err(e) => return CheckResult::errored(check_id, format!("failed to read {rel_path}: {e}")),
    };

    for rule in rules {
        if let Some(message) = rule.violation(&content) {
            sink.push(rel_path, None, message);
        }
    }

    if sink.is_empty() {
        CheckResult::pass(check_id, 1, format!("{} rule(s) hold for {rel_path}", rules.len()))
    } else {
        CheckResult::fail(check_id, 1, sink.into_violations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_semantics() {
        let contains = AssetRule::Contains { needle: "textContent", reason: "r" };
        assert!(contains.violation("el.textContent = x").is_none());
        assert!(contains.violation("el.innerText = x").is_some());

        let forbids = AssetRule::NotContains { needle: "eval(", reason: "r" };
        assert!(forbids.violation("evaluate()").is_none());
        assert!(forbids.violation("eval(code)").is_some());

        let any = AssetRule::AnyOf { needles: &["a(\"x\"", "a('x'"], reason: "r" };
        assert!(any.violation("a('x', 1)").is_none());
        assert!(any.violation("a(`x`)").is_some());
    }

    #[test]
    fn missing_file_is_a_single_violation() {
        let dir = tempfile::tempdir().unwrap();
        let result = check_asset(
            "assets/theme-toggle",
            "static/js/theme-toggle.js",
            &dir.path().join("static/js/theme-toggle.js"),
            THEME_TOGGLE_RULES,
        );
        assert!(!result.passed);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].message, "file does not exist");
    }

    #[test]
    fn each_broken_rule_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.css");
        std::fs::write(&path, "[data-theme=\"light\"] {}\n.theme-toggle-btn {}\n").unwrap();
        let result = check_asset("assets/stylesheet", "main.css", &path, STYLESHEET_RULES);
        let messages: Vec<_> = result.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("[data-theme=\"dark\"]"));
        assert!(messages[1].contains(":focus-visible"));
        assert!(messages[2].contains("@media (prefers-color-scheme: dark)"));
    }
}
