//! Fixture sites shared by the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use sitecheck_analysis::enforcement::AssertionRunner;
use sitecheck_core::config::SitecheckConfig;
use tempfile::TempDir;

pub const BODY_TEXT: &str = "This page explains how the site is built, which tools render it, \
     and where the source for every article lives. It is long enough to count as real content.";

pub const DESCRIPTION: &str =
    "A practical walkthrough of how this static site is generated, checked, and published.";

/// What kind of JSON-LD a generated page carries.
#[derive(Debug, Clone, Copy)]
pub enum Schema {
    WebPage,
    WebSite,
    Article,
}

impl Schema {
    fn block(self, title: &str, path: &str) -> String {
        match self {
            Self::WebPage => format!(
                r#"{{"@context": "https://schema.org", "@type": "WebPage", "name": "{title}"}}"#
            ),
            Self::WebSite => r#"{"@context": "https://schema.org", "@type": "WebSite", "name": "Example Site", "url": "https://example.com/"}"#.to_string(),
            Self::Article => format!(
                r#"{{"@context": "https://schema.org", "@type": "Article", "headline": "{title}", "author": {{"@type": "Person", "name": "A. Writer"}}, "datePublished": "2024-03-01", "description": "{DESCRIPTION}", "url": "https://example.com/{path}"}}"#
            ),
        }
    }
}

/// A page that passes every predicate in the catalog.
pub fn good_page(path: &str, title: &str, schema: Schema) -> String {
    let og_type = match schema {
        Schema::Article => "article",
        Schema::WebPage | Schema::WebSite => "website",
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <meta name="description" content="{DESCRIPTION}">
  <link rel="canonical" href="https://example.com/{path}">
  <meta property="og:title" content="{title}">
  <meta property="og:description" content="{DESCRIPTION}">
  <meta property="og:type" content="{og_type}">
  <meta property="og:url" content="https://example.com/{path}">
  <meta name="twitter:card" content="summary">
  <meta name="twitter:title" content="{title}">
  <meta name="twitter:description" content="{DESCRIPTION}">
  <script type="application/ld+json">{jsonld}</script>
</head>
<body>
  <nav aria-label="Primary"><a href="/">Example Site home</a> <a href="/writing/">All writing</a></nav>
  <main>
    <h1>{title}</h1>
    <p>{BODY_TEXT}</p>
    <h2>Details</h2>
    <p>See the <a href="https://www.rust-lang.org/" target="_blank" rel="noopener">Rust language site</a>.</p>
  </main>
</body>
</html>
"#,
        jsonld = schema.block(title, path),
    )
}

/// An interactive demo page: well-formed, but with none of the content
/// furniture (no description, canonical, landmarks or social tags).
pub fn demo_page(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body><h1>{title}</h1><canvas id="plasma"></canvas></body>
</html>
"#
    )
}

/// A project directory with a `public/` corpus.
pub struct SiteFixture {
    dir: TempDir,
}

impl SiteFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("public")).unwrap();
        Self { dir }
    }

    /// Homepage, an about page and one blog post, all passing.
    pub fn good() -> Self {
        let site = Self::new();
        site.page(
            "index.html",
            &good_page("", "Example Site: Notes on Building Things", Schema::WebSite),
        );
        site.page(
            "about/index.html",
            &good_page("about/", "About the Example Site", Schema::WebPage),
        );
        site.page(
            "writing/first-post.html",
            &good_page(
                "writing/first-post.html",
                "Writing a Static Site Checker",
                Schema::Article,
            ),
        );
        site
    }

    pub fn project(&self) -> &Path {
        self.dir.path()
    }

    pub fn corpus(&self) -> PathBuf {
        self.dir.path().join("public")
    }

    /// Write a corpus document, creating parent directories.
    pub fn page(&self, rel_path: &str, html: &str) -> &Self {
        self.file(&format!("public/{rel_path}"), html)
    }

    /// Write a project-relative file, creating parent directories.
    pub fn file(&self, rel_path: &str, content: &str) -> &Self {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn runner(&self) -> AssertionRunner {
        self.runner_with(&SitecheckConfig::default())
    }

    pub fn runner_with(&self, config: &SitecheckConfig) -> AssertionRunner {
        AssertionRunner::from_config(self.project(), config).unwrap()
    }
}
