//! Session-scoped parse cache keyed by corpus-relative path.
//!
//! Owned by the check session and passed to the runner; nothing global.
//! Parsing dominates run time, so each document is parsed at most once
//! no matter how many predicates inspect it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::sync::Cache;
use sitecheck_core::errors::ParseError;

use super::html::parse_html;
use super::types::HtmlDocument;
use crate::scanner::CorpusEntry;

/// Lazily populated cache of parsed documents.
pub struct DocumentCache {
    cache: Cache<String, Arc<HtmlDocument>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DocumentCache {
    /// Create a cache able to hold `capacity` documents without eviction.
    /// Size it to the corpus so no document is ever parsed twice.
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::new(capacity.max(1)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the parsed tree for `entry`, reading and parsing on first use.
    pub fn get_or_parse(&self, entry: &CorpusEntry) -> Result<Arc<HtmlDocument>, ParseError> {
        if let Some(doc) = self.cache.get(&entry.rel_path) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(doc);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let bytes = std::fs::read(&entry.path).map_err(|e| ParseError::ReadFailed {
            path: entry.rel_path.clone(),
            message: e.to_string(),
        })?;
        let doc = Arc::new(parse_html(&bytes, &entry.rel_path)?);
        self.cache.insert(entry.rel_path.clone(), Arc::clone(&doc));
        tracing::trace!(path = %entry.rel_path, elements = doc.len(), "parsed document");
        if doc.error_count() > 0 {
            tracing::debug!(
                path = %entry.rel_path,
                errors = doc.error_count(),
                lines = ?doc.error_lines(),
                "recovered from malformed markup"
            );
        }
        Ok(doc)
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.cache.contains_key(rel_path)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dir: &std::path::Path, name: &str, body: &str) -> CorpusEntry {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        CorpusEntry {
            rel_path: name.to_string(),
            path,
            file_size: body.len() as u64,
            content_hash: 0,
        }
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let dir = tempfile::tempdir().unwrap();
        let e = entry(dir.path(), "a.html", "<html><body><p>x</p></body></html>");
        let cache = DocumentCache::new(4);

        let first = cache.get_or_parse(&e).unwrap();
        let second = cache.get_or_parse(&e).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unreadable_document_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let e = CorpusEntry {
            rel_path: "gone.html".to_string(),
            path: dir.path().join("gone.html"),
            file_size: 0,
            content_hash: 0,
        };
        let cache = DocumentCache::new(1);
        assert!(matches!(
            cache.get_or_parse(&e),
            Err(ParseError::ReadFailed { ref path, .. }) if path == "gone.html"
        ));
        assert!(!cache.contains("gone.html"));
    }
}
