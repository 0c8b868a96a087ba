//! Reachability probes for URLs on the link checker's ignore list.
//!
//! An ignored URL should be ignored because it blocks automated clients,
//! not because it is dead. Each URL is fetched twice: as a browser, where
//! anything but 2xx/3xx (or 403) is a broken link, and as the link checker,
//! where a 2xx means the entry may not need ignoring at all.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sitecheck_core::config::ValidatorConfig;
use sitecheck_core::errors::{SitecheckErrorCode, ValidatorError};
use tracing::{info, warn};

use super::process::{run_tool, ToolInvocation};
use crate::enforcement::{timed, CheckResult, Severity, ViolationSink};

pub const IGNORED_URLS_CHECK: &str = "external/ignored-urls";
pub const BOT_BLOCK_CHECK: &str = "external/ignored-urls-bot-block";

/// Extra time allowed past the client's own `--max-time` before the probe
/// is killed.
const PROBE_KILL_MARGIN: Duration = Duration::from_secs(5);

/// The part of the link checker's YAML config we read.
#[derive(Debug, Default, Deserialize)]
pub struct LinkCheckerConfig {
    #[serde(rename = "IgnoreURLs", default)]
    pub ignore_urls: Vec<String>,
}

impl LinkCheckerConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit; treat it as no settings.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}

/// Fetches a URL and reports the final HTTP status code as text
/// (`"200"`, `"403"`, `"000"` when nothing answered).
pub trait StatusProbe {
    fn status(&self, url: &str, user_agent: &str) -> Result<String, ValidatorError>;
}

/// `curl -s -o /dev/null -w %{http_code} -A <agent> -L --max-time <n> <url>`
#[derive(Debug, Clone)]
pub struct CurlProbe {
    program: String,
    max_time_secs: u64,
}

impl CurlProbe {
    pub fn new(program: impl Into<String>, max_time_secs: u64) -> Self {
        Self {
            program: program.into(),
            max_time_secs,
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.effective_http_client(), config.effective_probe_timeout_secs())
    }

    pub fn invocation(&self, url: &str, user_agent: &str) -> ToolInvocation {
        ToolInvocation::new(
            self.program.clone(),
            Duration::from_secs(self.max_time_secs) + PROBE_KILL_MARGIN,
        )
        .args(["-s", "-o", "/dev/null", "-w", "%{http_code}", "-A"])
        .arg(user_agent)
        .arg("-L")
        .arg("--max-time")
        .arg(self.max_time_secs.to_string())
        .arg(url)
    }
}

impl StatusProbe for CurlProbe {
    fn status(&self, url: &str, user_agent: &str) -> Result<String, ValidatorError> {
        // curl exits non-zero on transport errors but still prints "000".
        let output = run_tool(&self.invocation(url, user_agent))?;
        let code = output.stdout.trim();
        Ok(if code.is_empty() { "000".to_string() } else { code.to_string() })
    }
}

/// How a status observed with a browser identity is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    /// 403 even for a browser: aggressive bot protection, worth noting.
    Blocked,
    Broken,
}

pub fn classify_browser_status(code: &str) -> Reachability {
    if code.starts_with('2') || code.starts_with('3') {
        Reachability::Reachable
    } else if code == "403" {
        Reachability::Blocked
    } else {
        Reachability::Broken
    }
}

/// The ignore list and the identities to probe it with.
#[derive(Debug, Clone)]
pub struct IgnoredUrlProbe {
    config_path: PathBuf,
    config_label: String,
    browser_user_agent: String,
    bot_user_agent: String,
}

impl IgnoredUrlProbe {
    pub fn from_config(project_root: &Path, config: &ValidatorConfig) -> Self {
        let label = config.effective_link_checker_config().to_string();
        Self {
            config_path: project_root.join(&label),
            config_label: label,
            browser_user_agent: config.effective_browser_user_agent().to_string(),
            bot_user_agent: config.effective_bot_user_agent().to_string(),
        }
    }

    /// Read the ignore list. `Ok(None)` when the config file is absent.
    pub fn load_ignore_list(&self) -> Result<Option<Vec<String>>, ValidatorError> {
        if !self.config_path.exists() {
            return Ok(None);
        }
        let unreadable = |message: String| ValidatorError::ConfigUnreadable {
            path: self.config_path.display().to_string(),
            message,
        };
        let text = std::fs::read_to_string(&self.config_path).map_err(|e| unreadable(e.to_string()))?;
        let parsed = LinkCheckerConfig::from_yaml(&text).map_err(|e| unreadable(e.to_string()))?;
        Ok(Some(parsed.ignore_urls))
    }

    /// Both ignore-list checks: reachability, then bot blocking.
    pub fn run(&self, probe: &dyn StatusProbe) -> Vec<CheckResult> {
        let urls = match self.load_ignore_list() {
            Ok(Some(urls)) if !urls.is_empty() => urls,
            Ok(Some(_)) => {
                return self.skip_both(format!("No IgnoreURLs configured in {}", self.config_label));
            }
            Ok(None) => {
                return self.skip_both(format!("No {} configuration file found", self.config_label));
            }
            Err(e) => {
                let message = e.coded_string();
                return vec![
                    CheckResult::errored(IGNORED_URLS_CHECK, message.clone()),
                    CheckResult::errored(BOT_BLOCK_CHECK, message),
                ];
            }
        };

        info!(urls = urls.len(), config = %self.config_label, "probing ignored URLs");
        vec![
            timed(|| self.check_reachable(&urls, probe)),
            timed(|| self.check_bot_block(&urls, probe)),
        ]
    }

    /// A failed probe is an error against that URL; the remaining URLs are
    /// still checked.
    fn push_probe_error(&self, sink: &mut ViolationSink, url: &str, err: &ValidatorError) {
        warn!(url = %url, error = %err, "probe failed");
        sink.push_as(
            Severity::Error,
            &self.config_label,
            None,
            format!("{url}: probe failed: {}", err.coded_string()),
        );
    }

    fn skip_both(&self, reason: String) -> Vec<CheckResult> {
        warn!("{reason}");
        vec![
            CheckResult::skipped(IGNORED_URLS_CHECK, reason.clone()),
            CheckResult::skipped(BOT_BLOCK_CHECK, reason),
        ]
    }

    /// Every ignored URL answers a browser with 2xx/3xx. A 403 is noted as
    /// a warning; anything else is a broken link.
    pub fn check_reachable(&self, urls: &[String], probe: &dyn StatusProbe) -> CheckResult {
        let mut sink = ViolationSink::new(IGNORED_URLS_CHECK, Severity::Error);
        for url in urls {
            let code = match probe.status(url, &self.browser_user_agent) {
                Ok(code) => code,
                Err(e @ ValidatorError::ToolMissing { .. }) => {
                    return CheckResult::errored(IGNORED_URLS_CHECK, e.coded_string())
                }
                Err(e) => {
                    self.push_probe_error(&mut sink, url, &e);
                    continue;
                }
            };
            match classify_browser_status(&code) {
                Reachability::Reachable => {}
                Reachability::Blocked => {
                    warn!(url = %url, "ignored URL returns 403 even for a browser");
                    sink.push_as(
                        Severity::Warning,
                        &self.config_label,
                        None,
                        format!("{url}: HTTP {code} (blocked even for a browser user agent)"),
                    );
                }
                Reachability::Broken => sink.push(
                    &self.config_label,
                    None,
                    format!(
                        "{url}: HTTP {code}. Ignored but appears broken; \
                         remove it from IgnoreURLs or update the link."
                    ),
                ),
            }
        }

        let checked = urls.len();
        if sink.has_errors() {
            CheckResult::fail(IGNORED_URLS_CHECK, checked, sink.into_violations())
        } else if !sink.is_empty() {
            CheckResult::warn(IGNORED_URLS_CHECK, checked, sink.into_violations())
        } else {
            CheckResult::pass(
                IGNORED_URLS_CHECK,
                checked,
                format!("{checked} ignored URL(s) reachable"),
            )
        }
    }

    /// Advisory: an ignored URL that serves the link checker's own user
    /// agent a 2xx probably does not need to be ignored.
    pub fn check_bot_block(&self, urls: &[String], probe: &dyn StatusProbe) -> CheckResult {
        let mut sink = ViolationSink::new(BOT_BLOCK_CHECK, Severity::Warning);
        for url in urls {
            let code = match probe.status(url, &self.bot_user_agent) {
                Ok(code) => code,
                Err(e @ ValidatorError::ToolMissing { .. }) => {
                    return CheckResult::errored(BOT_BLOCK_CHECK, e.coded_string())
                }
                Err(e) => {
                    self.push_probe_error(&mut sink, url, &e);
                    continue;
                }
            };
            if code.starts_with('2') {
                warn!(url = %url, "ignored URL does not block bots");
                sink.push(
                    &self.config_label,
                    None,
                    format!("{url}: HTTP {code} for \"{}\"; may not need ignoring", self.bot_user_agent),
                );
            }
        }

        let checked = urls.len();
        if sink.has_errors() {
            CheckResult::fail(BOT_BLOCK_CHECK, checked, sink.into_violations())
        } else if sink.is_empty() {
            CheckResult::pass(BOT_BLOCK_CHECK, checked, format!("{checked} ignored URL(s) block bots"))
        } else {
            CheckResult::warn(BOT_BLOCK_CHECK, checked, sink.into_violations())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcement::CheckStatus;
    use std::collections::HashMap;

    /// Answers from a fixed table keyed by `(url, agent)`.
    struct FixedProbe(HashMap<(String, String), String>);

    impl FixedProbe {
        fn new(rows: &[(&str, &str, &str)]) -> Self {
            Self(
                rows.iter()
                    .map(|(u, a, c)| ((u.to_string(), a.to_string()), c.to_string()))
                    .collect(),
            )
        }
    }

    impl StatusProbe for FixedProbe {
        fn status(&self, url: &str, user_agent: &str) -> Result<String, ValidatorError> {
            Ok(self
                .0
                .get(&(url.to_string(), user_agent.to_string()))
                .cloned()
                .unwrap_or_else(|| "000".to_string()))
        }
    }

    fn probe_for(dir: &Path) -> IgnoredUrlProbe {
        IgnoredUrlProbe::from_config(dir, &ValidatorConfig::default())
    }

    const BROWSER: &str = sitecheck_core::constants::DEFAULT_BROWSER_USER_AGENT;

    #[test]
    fn browser_status_classification() {
        assert_eq!(classify_browser_status("200"), Reachability::Reachable);
        assert_eq!(classify_browser_status("301"), Reachability::Reachable);
        assert_eq!(classify_browser_status("403"), Reachability::Blocked);
        assert_eq!(classify_browser_status("404"), Reachability::Broken);
        assert_eq!(classify_browser_status("000"), Reachability::Broken);
    }

    #[test]
    fn missing_config_skips_both_checks() {
        let dir = tempfile::tempdir().unwrap();
        let results = probe_for(dir.path()).run(&FixedProbe::new(&[]));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == CheckStatus::Skipped));
    }

    #[test]
    fn empty_ignore_list_skips() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".htmltest.yml"), "DirectoryPath: public\n").unwrap();
        let results = probe_for(dir.path()).run(&FixedProbe::new(&[]));
        assert!(results.iter().all(|r| r.status == CheckStatus::Skipped));
        assert!(results[0].summary.contains("No IgnoreURLs"));
    }

    #[test]
    fn broken_url_fails_and_blocked_url_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".htmltest.yml"),
            "IgnoreURLs:\n  - https://ok.example\n  - https://gone.example\n  - https://walled.example\n",
        )
        .unwrap();
        let probe = FixedProbe::new(&[
            ("https://ok.example", BROWSER, "200"),
            ("https://gone.example", BROWSER, "404"),
            ("https://walled.example", BROWSER, "403"),
            ("https://ok.example", "htmltest", "200"),
        ]);
        let results = probe_for(dir.path()).run(&probe);

        let reach = &results[0];
        assert_eq!(reach.status, CheckStatus::Failed);
        assert_eq!(reach.violations.len(), 2);
        assert_eq!(reach.violations[0].severity, Severity::Error);
        assert!(reach.violations[0].message.starts_with("https://gone.example: HTTP 404"));
        assert_eq!(reach.violations[1].severity, Severity::Warning);

        let bots = &results[1];
        assert_eq!(bots.status, CheckStatus::Warned);
        assert!(bots.passed);
        assert_eq!(bots.violations.len(), 1);
        assert!(bots.violations[0].message.starts_with("https://ok.example: HTTP 200"));
    }

    #[test]
    fn blocked_only_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_for(dir.path());
        let urls = vec!["https://walled.example".to_string()];
        let result = probe.check_reachable(&urls, &FixedProbe::new(&[("https://walled.example", BROWSER, "403")]));
        assert_eq!(result.status, CheckStatus::Warned);
    }

    /// Times out on one host and answers 200 everywhere else.
    struct FlakyProbe;

    impl StatusProbe for FlakyProbe {
        fn status(&self, url: &str, _user_agent: &str) -> Result<String, ValidatorError> {
            if url.contains("slow.example") {
                Err(ValidatorError::TimedOut {
                    tool: "curl".to_string(),
                    timeout_secs: 15,
                })
            } else if url.contains("gone.example") {
                Ok("404".to_string())
            } else {
                Ok("200".to_string())
            }
        }
    }

    struct NoCurl;

    impl StatusProbe for NoCurl {
        fn status(&self, _url: &str, _user_agent: &str) -> Result<String, ValidatorError> {
            Err(ValidatorError::ToolMissing {
                tool: "curl".to_string(),
            })
        }
    }

    #[test]
    fn failed_probe_is_recorded_and_scanning_continues() {
        let dir = tempfile::tempdir().unwrap();
        let probe = probe_for(dir.path());
        let urls = vec![
            "https://slow.example".to_string(),
            "https://gone.example".to_string(),
        ];

        let reach = probe.check_reachable(&urls, &FlakyProbe);
        assert_eq!(reach.status, CheckStatus::Failed);
        assert_eq!(reach.violations.len(), 2);
        assert!(reach.violations[0].message.starts_with("https://slow.example: probe failed: [TOOL_TIMEOUT]"));
        assert!(reach.violations[1].message.starts_with("https://gone.example: HTTP 404"));

        let bots = probe.check_bot_block(&urls, &FlakyProbe);
        assert_eq!(bots.status, CheckStatus::Failed);
        assert_eq!(bots.violations.len(), 1);
        assert_eq!(bots.violations[0].severity, Severity::Error);
    }

    #[test]
    fn missing_curl_errors_the_check() {
        let dir = tempfile::tempdir().unwrap();
        let urls = vec!["https://a.example".to_string()];
        let result = probe_for(dir.path()).check_reachable(&urls, &NoCurl);
        assert_eq!(result.status, CheckStatus::Errored);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn unparseable_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".htmltest.yml"), "IgnoreURLs: [unclosed\n").unwrap();
        let results = probe_for(dir.path()).run(&FixedProbe::new(&[]));
        assert!(results.iter().all(|r| r.status == CheckStatus::Errored));
        assert!(results[0].error.as_deref().unwrap_or("").starts_with("[TOOL_ERROR]"));
    }

    #[test]
    fn curl_invocation_shape() {
        let inv = CurlProbe::new("curl", 10).invocation("https://x.example", "htmltest");
        assert_eq!(
            inv.args,
            vec![
                "-s", "-o", "/dev/null", "-w", "%{http_code}", "-A", "htmltest", "-L",
                "--max-time", "10", "https://x.example"
            ]
        );
        assert_eq!(inv.timeout, Duration::from_secs(15));
    }
}
