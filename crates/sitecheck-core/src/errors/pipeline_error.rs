//! Session-level error aggregation.

use super::error_code::SitecheckErrorCode;
use super::{CheckError, ConfigError, ParseError, ScanError, ValidatorError};

/// Errors that can occur during a check session.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Validator error: {0}")]
    Validator(#[from] ValidatorError),

    #[error("Check error: {0}")]
    Check(#[from] CheckError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SitecheckErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::Validator(e) => e.error_code(),
            Self::Check(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
