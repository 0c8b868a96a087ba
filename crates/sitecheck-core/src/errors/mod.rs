//! Error handling for sitecheck.
//! One error enum per subsystem, `thiserror` only.

pub mod check_error;
pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod scan_error;
pub mod validator_error;

pub use check_error::CheckError;
pub use config_error::ConfigError;
pub use error_code::SitecheckErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::PipelineError;
pub use scan_error::ScanError;
pub use validator_error::ValidatorError;
