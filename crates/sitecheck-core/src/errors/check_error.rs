//! Check evaluation errors.

use super::error_code::{self, SitecheckErrorCode};

/// Errors raised when a check result is turned into a hard failure.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// One consolidated failure listing every violation of one check.
    #[error("{report}")]
    AssertionFailed { check_id: String, report: String },

    #[error("Unknown check: {id}")]
    UnknownCheck { id: String },

    #[error("Check {check_id} could not be evaluated: {message}")]
    EvaluationFailed { check_id: String, message: String },
}

impl SitecheckErrorCode for CheckError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCheck { .. } => error_code::UNKNOWN_CHECK,
            _ => error_code::CHECK_FAILED,
        }
    }
}
