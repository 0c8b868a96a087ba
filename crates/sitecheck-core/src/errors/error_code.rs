//! SitecheckErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that reporters and the CLI print alongside the message.
pub trait SitecheckErrorCode {
    /// Returns the error code string (e.g., "CORPUS_NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const CORPUS_NOT_FOUND: &str = "CORPUS_NOT_FOUND";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const TOOL_MISSING: &str = "TOOL_MISSING";
pub const TOOL_TIMEOUT: &str = "TOOL_TIMEOUT";
pub const TOOL_ERROR: &str = "TOOL_ERROR";
pub const CHECK_FAILED: &str = "CHECK_FAILED";
pub const UNKNOWN_CHECK: &str = "UNKNOWN_CHECK";
