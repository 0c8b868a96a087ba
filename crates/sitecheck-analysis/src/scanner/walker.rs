//! Corpus walker using `ignore` for traversal and `globset` for matching.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use sitecheck_core::errors::ScanError;

/// Compile the corpus match pattern. The pattern is matched against the
/// corpus-relative path, and `*` crosses directory separators, so `*.html`
/// selects documents at any depth.
pub fn compile_matcher(pattern: &str) -> Result<GlobMatcher, ScanError> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Walk `root` recursively and return every regular file whose
/// corpus-relative path satisfies `matcher`, as `(rel_path, path)` pairs.
///
/// The generated corpus is not a source tree: VCS ignore files and hidden
/// file filtering are disabled so nothing the build emitted is skipped.
pub fn walk_corpus(root: &Path, matcher: &GlobMatcher) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = result.map_err(|e| walk_error(root, e))?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.into_path();
        let Some(rel_path) = relative_path(root, &path) else {
            continue;
        };
        if matcher.is_match(&rel_path) {
            files.push((rel_path, path));
        }
    }

    Ok(files)
}

fn walk_error(root: &Path, err: ignore::Error) -> ScanError {
    let path = error_path(&err).unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    ScanError::IoError { path, source }
}

/// The path an `ignore` error is attached to, looking through depth and
/// line-number wrappers.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

/// Corpus-relative path of `path` with `/` separators on every platform.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
