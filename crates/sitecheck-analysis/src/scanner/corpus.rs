//! Corpus: the once-per-session, read-only listing of generated documents.

use std::path::{Path, PathBuf};
use std::time::Instant;

use sitecheck_core::config::CorpusConfig;
use sitecheck_core::errors::ScanError;
use tracing::{debug, info};

use super::hasher::{fingerprint, hash_content};
use super::types::{CorpusEntry, CorpusStats};
use super::walker::{compile_matcher, walk_corpus};

/// Every matching document under the corpus root, sorted by relative path.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    entries: Vec<CorpusEntry>,
    stats: CorpusStats,
}

impl Corpus {
    /// Discover the corpus under `root`.
    ///
    /// Fails with `ScanError::CorpusNotFound` when the directory is absent;
    /// the message tells the operator to run the site build first.
    pub fn load(root: &Path, config: &CorpusConfig) -> Result<Self, ScanError> {
        let start = Instant::now();

        if !root.exists() {
            return Err(ScanError::CorpusNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let matcher = compile_matcher(config.effective_match())?;
        let mut files = walk_corpus(root, &matcher)?;
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = Vec::with_capacity(files.len());
        for (rel_path, path) in files {
            let content = std::fs::read(&path).map_err(|source| ScanError::IoError {
                path: path.clone(),
                source,
            })?;
            debug!(path = %rel_path, bytes = content.len(), "discovered document");
            entries.push(CorpusEntry {
                rel_path,
                path,
                file_size: content.len() as u64,
                content_hash: hash_content(&content),
            });
        }

        let stats = CorpusStats {
            total_files: entries.len(),
            total_size_bytes: entries.iter().map(|e| e.file_size).sum(),
            discovery_ms: start.elapsed().as_millis() as u64,
            fingerprint: fingerprint(entries.iter().map(|e| (e.rel_path.as_str(), e.content_hash))),
        };

        info!(
            root = %root.display(),
            files = stats.total_files,
            bytes = stats.total_size_bytes,
            ms = stats.discovery_ms,
            "corpus loaded"
        );

        Ok(Self {
            root: root.to_path_buf(),
            entries,
            stats,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entries in deterministic (path-sorted) scan order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn get(&self, rel_path: &str) -> Option<&CorpusEntry> {
        self.entries
            .binary_search_by(|e| e.rel_path.as_str().cmp(rel_path))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.get(rel_path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }
}
