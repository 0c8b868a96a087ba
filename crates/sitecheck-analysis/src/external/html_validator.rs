//! HTML conformance checking through an external validator.

use std::path::Path;
use std::time::Duration;

use sitecheck_core::config::ValidatorConfig;
use sitecheck_core::errors::{ScanError, SitecheckErrorCode};

use super::process::{run_tool, ToolInvocation};
use super::tool_check_result;
use crate::enforcement::CheckResult;

pub const HTML_VALIDATOR_CHECK: &str = "external/html-validator";

/// `html5validator --root <corpus> --match "*.html" --blacklist <prefixes…>`
/// plus any configured extra arguments.
pub fn html_validator_invocation(
    corpus_root: &Path,
    config: &ValidatorConfig,
    static_prefixes: &[String],
) -> ToolInvocation {
    let mut inv = ToolInvocation::new(
        config.effective_html_validator(),
        Duration::from_secs(config.effective_html_validator_timeout_secs()),
    )
    .arg("--root")
    .arg(corpus_root.display().to_string())
    .arg("--match")
    .arg("*.html");
    if !static_prefixes.is_empty() {
        inv = inv.arg("--blacklist").args(static_prefixes.iter().cloned());
    }
    inv.args(config.html_validator_args.iter().cloned())
}

/// Run the validator over the corpus. Static-content subtrees are excluded.
pub fn run_html_validator(
    corpus_root: &Path,
    config: &ValidatorConfig,
    static_prefixes: &[String],
) -> CheckResult {
    if !corpus_root.is_dir() {
        let err = ScanError::CorpusNotFound {
            path: corpus_root.to_path_buf(),
        };
        return CheckResult::errored(HTML_VALIDATOR_CHECK, err.coded_string());
    }
    let inv = html_validator_invocation(corpus_root, config, static_prefixes);
    tool_check_result(
        HTML_VALIDATOR_CHECK,
        &inv.program,
        &corpus_root.display().to_string(),
        run_tool(&inv),
        "Fix the HTML validation errors above.",
    )
}
