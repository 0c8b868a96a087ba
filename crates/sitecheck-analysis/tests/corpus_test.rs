//! Corpus discovery and parse cache tests.

mod common;

use std::sync::Arc;

use common::{demo_page, SiteFixture};
use sitecheck_analysis::parsers::DocumentCache;
use sitecheck_analysis::scanner::Corpus;
use sitecheck_core::config::CorpusConfig;
use sitecheck_core::errors::{ScanError, SitecheckErrorCode};

// ─── Discovery ──────────────────────────────────────────────────────────

#[test]
fn entries_are_sorted_relative_paths_of_matching_files() {
    let site = SiteFixture::good();
    site.page("tags/rust/index.html", &demo_page("Posts tagged Rust"));
    site.page("css/main.css", "body {}");
    site.page("robots.txt", "User-agent: *");

    let corpus = Corpus::load(&site.corpus(), &CorpusConfig::default()).unwrap();
    let paths: Vec<&str> = corpus.entries().iter().map(|e| e.rel_path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "about/index.html",
            "index.html",
            "tags/rust/index.html",
            "writing/first-post.html",
        ]
    );
    assert_eq!(corpus.len(), 4);
    assert_eq!(corpus.stats().total_files, 4);
    assert!(corpus.contains("tags/rust/index.html"));
    assert!(!corpus.contains("css/main.css"));
}

#[test]
fn hidden_files_in_the_corpus_are_not_skipped() {
    let site = SiteFixture::new();
    site.page(".well-known/index.html", &demo_page("Well known resources"));
    let corpus = Corpus::load(&site.corpus(), &CorpusConfig::default()).unwrap();
    assert!(corpus.contains(".well-known/index.html"));
}

#[test]
fn custom_match_pattern() {
    let site = SiteFixture::good();
    site.page("feed.xml", "<rss></rss>");
    let config = CorpusConfig {
        match_glob: Some("*.xml".to_string()),
        ..Default::default()
    };
    let corpus = Corpus::load(&site.corpus(), &config).unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.entries()[0].rel_path, "feed.xml");
}

#[test]
fn empty_corpus_is_not_an_error() {
    let site = SiteFixture::new();
    let corpus = Corpus::load(&site.corpus(), &CorpusConfig::default()).unwrap();
    assert!(corpus.is_empty());
}

#[test]
fn missing_corpus_names_the_build_step() {
    let site = SiteFixture::new();
    let err = Corpus::load(&site.project().join("dist"), &CorpusConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::CorpusNotFound { .. }));
    assert_eq!(err.error_code(), "CORPUS_NOT_FOUND");
    assert!(err.to_string().contains("Run the site build"));
}

#[test]
fn file_as_corpus_root_is_rejected() {
    let site = SiteFixture::new();
    site.file("public.html", "<p>x</p>");
    let err = Corpus::load(&site.project().join("public.html"), &CorpusConfig::default()).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory { .. }));
}

// ─── Fingerprint ────────────────────────────────────────────────────────

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    let site = SiteFixture::good();
    let first = Corpus::load(&site.corpus(), &CorpusConfig::default()).unwrap();
    let again = Corpus::load(&site.corpus(), &CorpusConfig::default()).unwrap();
    assert_eq!(first.stats().fingerprint, again.stats().fingerprint);

    site.page("about/index.html", &demo_page("About, rewritten entirely"));
    let changed = Corpus::load(&site.corpus(), &CorpusConfig::default()).unwrap();
    assert_ne!(first.stats().fingerprint, changed.stats().fingerprint);
}

// ─── Cache ──────────────────────────────────────────────────────────────

#[test]
fn each_document_is_parsed_once() {
    let site = SiteFixture::good();
    let corpus = Corpus::load(&site.corpus(), &CorpusConfig::default()).unwrap();
    let cache = DocumentCache::new(corpus.len() as u64);

    let first: Vec<_> = corpus.entries().iter().map(|e| cache.get_or_parse(e).unwrap()).collect();
    let second: Vec<_> = corpus.entries().iter().map(|e| cache.get_or_parse(e).unwrap()).collect();

    for (a, b) in first.iter().zip(&second) {
        assert!(Arc::ptr_eq(a, b));
    }
    assert_eq!(cache.misses(), 3);
    assert_eq!(cache.hits(), 3);
    assert!(cache.contains("index.html"));
}
