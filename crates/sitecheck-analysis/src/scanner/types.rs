//! Scanner data types: CorpusEntry, CorpusStats.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One discovered corpus document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Corpus-relative path with `/` separators. Unique key of the document.
    pub rel_path: String,
    /// Absolute (or root-joined) filesystem path.
    pub path: PathBuf,
    pub file_size: u64,
    pub content_hash: u64,
}

/// Aggregate statistics for corpus discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub discovery_ms: u64,
    /// Fingerprint over every `(rel_path, content_hash)` in scan order.
    pub fingerprint: u64,
}
