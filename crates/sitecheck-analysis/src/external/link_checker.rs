//! Link and asset-reference checking through an external link checker.

use std::path::Path;
use std::time::Duration;

use sitecheck_core::config::ValidatorConfig;
use sitecheck_core::errors::{ScanError, SitecheckErrorCode};

use super::process::{run_tool, ToolInvocation};
use super::tool_check_result;
use crate::enforcement::CheckResult;

pub const LINK_CHECKER_CHECK: &str = "external/link-checker";

/// The checker takes no arguments; it reads its own config from the
/// project root.
pub fn link_checker_invocation(project_root: &Path, config: &ValidatorConfig) -> ToolInvocation {
    ToolInvocation::new(
        config.effective_link_checker(),
        Duration::from_secs(config.effective_link_checker_timeout_secs()),
    )
    .current_dir(project_root)
}

pub fn run_link_checker(project_root: &Path, corpus_root: &Path, config: &ValidatorConfig) -> CheckResult {
    if !corpus_root.is_dir() {
        let err = ScanError::CorpusNotFound {
            path: corpus_root.to_path_buf(),
        };
        return CheckResult::errored(LINK_CHECKER_CHECK, err.coded_string());
    }
    let inv = link_checker_invocation(project_root, config);
    tool_check_result(
        LINK_CHECKER_CHECK,
        &inv.program,
        &project_root.display().to_string(),
        run_tool(&inv),
        "Fix the HTML validation errors above.",
    )
}
