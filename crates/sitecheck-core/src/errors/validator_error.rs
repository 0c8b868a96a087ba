//! External validator errors.

use super::error_code::{self, SitecheckErrorCode};

/// Errors that can occur while running an out-of-process validator.
///
/// A tool that runs and reports problems is not an error; it yields a
/// non-zero exit status that the bridge turns into a failed check.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    #[error("{tool} command not found. Make sure it is installed and on PATH (e.g. run inside the project's dev shell).")]
    ToolMissing { tool: String },

    #[error("{tool} timed out after {timeout_secs} seconds")]
    TimedOut { tool: String, timeout_secs: u64 },

    #[error("Failed to run {tool}: {message}")]
    SpawnFailed { tool: String, message: String },

    #[error("Failed to read {path}: {message}")]
    ConfigUnreadable { path: String, message: String },
}

impl SitecheckErrorCode for ValidatorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ToolMissing { .. } => error_code::TOOL_MISSING,
            Self::TimedOut { .. } => error_code::TOOL_TIMEOUT,
            _ => error_code::TOOL_ERROR,
        }
    }
}
