//! Corpus discovery errors.

use std::path::PathBuf;

use super::error_code::{self, SitecheckErrorCode};

/// Errors that can occur while discovering the generated corpus.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Corpus directory not found at {path}. Run the site build (e.g. './build') before running checks.")]
    CorpusNotFound { path: PathBuf },

    #[error("Corpus root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Invalid corpus match pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SitecheckErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CorpusNotFound { .. } => error_code::CORPUS_NOT_FOUND,
            _ => error_code::SCAN_ERROR,
        }
    }
}
