//! Document parser errors.

use super::error_code::{self, SitecheckErrorCode};

/// Errors that can occur while reading or parsing a corpus document.
///
/// Malformed markup is never an error; the parser recovers. These cover the
/// cases where no tree can be produced at all. `Clone` so a cached failure
/// can be handed to every predicate that asks for the same document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Grammar could not be loaded: {message}")]
    GrammarUnavailable { message: String },

    #[error("Tree-sitter produced no tree for {path}")]
    NoTree { path: String },
}

impl SitecheckErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        error_code::PARSE_ERROR
    }
}
