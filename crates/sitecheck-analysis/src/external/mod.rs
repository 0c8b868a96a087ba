//! External validator bridge: out-of-process conformance tools.
//!
//! Tools are black boxes. The bridge runs them with a bounded timeout and
//! turns exit status and captured output into check results; a tool that
//! is missing or hangs is reported differently from one that found errors.

pub mod html_validator;
pub mod ignored_urls;
pub mod link_checker;
pub mod process;

use std::path::{Path, PathBuf};

use sitecheck_core::config::SitecheckConfig;
use sitecheck_core::errors::{SitecheckErrorCode, ValidatorError};

use crate::enforcement::{timed, CheckResult, Severity, ViolationSink};
use crate::exemptions::ExemptionRules;
pub use html_validator::HTML_VALIDATOR_CHECK;
pub use ignored_urls::{CurlProbe, IgnoredUrlProbe, StatusProbe, BOT_BLOCK_CHECK, IGNORED_URLS_CHECK};
pub use link_checker::LINK_CHECKER_CHECK;
pub use process::{run_tool, ToolInvocation, ToolOutput};

/// Translate one tool run into a check result.
///
/// `subject` is what the violation is filed against (the corpus root or
/// the project root); `hint` closes the failure message.
pub fn tool_check_result(
    check_id: &str,
    tool: &str,
    subject: &str,
    outcome: Result<ToolOutput, ValidatorError>,
    hint: &str,
) -> CheckResult {
    match outcome {
        Ok(output) if output.success() => {
            CheckResult::pass(check_id, 0, format!("{tool} reported no problems"))
        }
        Ok(output) => {
            let status = match output.exit_code {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            };
            tracing::debug!(tool, %status, "tool reported problems");
            let mut sink = ViolationSink::new(check_id, Severity::Error);
            sink.push(
                subject,
                None,
                format!("{tool} found errors:\n\n{}\n\n{hint}", output.combined()),
            );
            CheckResult::fail(check_id, 0, sink.into_violations())
        }
        Err(e) => CheckResult::errored(check_id, e.coded_string()),
    }
}

/// Everything the external checks need, resolved from configuration.
#[derive(Debug, Clone)]
pub struct ExternalChecks {
    project_root: PathBuf,
    corpus_root: PathBuf,
    config: SitecheckConfig,
    static_prefixes: Vec<String>,
}

impl ExternalChecks {
    pub fn new(project_root: &Path, config: &SitecheckConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            corpus_root: config.corpus_root(project_root),
            config: config.clone(),
            static_prefixes: ExemptionRules::from_config(&config.corpus).static_prefixes(),
        }
    }

    pub fn html_validator(&self) -> CheckResult {
        html_validator::run_html_validator(
            &self.corpus_root,
            &self.config.validators,
            &self.static_prefixes,
        )
    }

    pub fn link_checker(&self) -> CheckResult {
        link_checker::run_link_checker(&self.project_root, &self.corpus_root, &self.config.validators)
    }

    /// Ignore-list reachability with a browser identity, then the bot check.
    pub fn ignored_urls(&self) -> Vec<CheckResult> {
        let probe = CurlProbe::from_config(&self.config.validators);
        IgnoredUrlProbe::from_config(&self.project_root, &self.config.validators).run(&probe)
    }

    /// Every external check, in order.
    pub fn run_all(&self) -> Vec<CheckResult> {
        let mut results = vec![timed(|| self.html_validator()), timed(|| self.link_checker())];
        results.extend(self.ignored_urls());
        results
    }
}
