//! Corpus discovery and exemption configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::list_or_default;
use crate::constants;

/// Configuration for locating the generated corpus and classifying its paths.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CorpusConfig {
    /// Corpus directory. Relative paths resolve against the project root.
    /// Default: "public".
    pub root: Option<String>,
    /// Glob selecting corpus documents. Default: "*.html".
    #[serde(rename = "match")]
    pub match_glob: Option<String>,
    /// Top-level subdirectories holding interactive/static content.
    #[serde(default)]
    pub static_prefixes: Vec<String>,
    /// Directory segments marking generator-produced taxonomy listings.
    #[serde(default)]
    pub taxonomy_segments: Vec<String>,
    /// Sections whose non-index pages are blog posts.
    #[serde(default)]
    pub blog_sections: Vec<String>,
}

impl CorpusConfig {
    pub fn effective_root(&self) -> &str {
        self.root.as_deref().unwrap_or(constants::DEFAULT_CORPUS_ROOT)
    }

    /// Resolves the corpus directory against `project_root`.
    pub fn resolve_root(&self, project_root: &Path) -> PathBuf {
        let root = Path::new(self.effective_root());
        if root.is_absolute() {
            root.to_path_buf()
        } else {
            project_root.join(root)
        }
    }

    pub fn effective_match(&self) -> &str {
        self.match_glob
            .as_deref()
            .unwrap_or(constants::DEFAULT_CORPUS_MATCH)
    }

    pub fn effective_static_prefixes(&self) -> Vec<String> {
        list_or_default(&self.static_prefixes, constants::DEFAULT_STATIC_PREFIXES)
    }

    pub fn effective_taxonomy_segments(&self) -> Vec<String> {
        list_or_default(&self.taxonomy_segments, constants::DEFAULT_TAXONOMY_SEGMENTS)
    }

    pub fn effective_blog_sections(&self) -> Vec<String> {
        list_or_default(&self.blog_sections, constants::DEFAULT_BLOG_SECTIONS)
    }
}
