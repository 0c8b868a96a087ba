//! Shared constants for the sitecheck validation suite.

/// sitecheck version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "sitecheck.toml";

/// Default corpus directory, relative to the project root.
pub const DEFAULT_CORPUS_ROOT: &str = "public";

/// Default corpus match glob.
pub const DEFAULT_CORPUS_MATCH: &str = "*.html";

/// Subtrees holding interactive/demo content that opts out of content rules.
pub const DEFAULT_STATIC_PREFIXES: &[&str] = &["plasma"];

/// Directory segments produced by the generator for taxonomy listings.
pub const DEFAULT_TAXONOMY_SEGMENTS: &[&str] = &["categories", "tags"];

/// Sections whose non-index pages are blog posts.
pub const DEFAULT_BLOG_SECTIONS: &[&str] = &["writing"];

/// Homepage path, relative to the corpus root.
pub const HOMEPAGE_PATH: &str = "index.html";

// ---- Content thresholds ----

/// Minimum meta description length in characters.
pub const DEFAULT_DESCRIPTION_MIN: usize = 50;

/// Maximum meta description length in characters.
pub const DEFAULT_DESCRIPTION_MAX: usize = 160;

/// Minimum title length in characters.
pub const DEFAULT_TITLE_MIN: usize = 10;

/// Minimum rendered text length of the main content region.
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 100;

pub const DEFAULT_GENERIC_TITLES: &[&str] = &["Untitled", "New Page", "Page", "Home"];

pub const DEFAULT_PLACEHOLDER_PHRASES: &[&str] =
    &["lorem ipsum", "dolor sit amet", "consectetur adipiscing"];

pub const DEFAULT_NON_DESCRIPTIVE_LINK_TEXT: &[&str] =
    &["click here", "read more", "more", "link", "here"];

pub const DEFAULT_DECORATIVE_ALT_WORDS: &[&str] =
    &["decorative", "decoration", "spacer", "divider"];

// ---- Metadata allow-lists ----

pub const DEFAULT_OG_REQUIRED: &[&str] = &["og:title", "og:description", "og:type", "og:url"];

pub const DEFAULT_OG_TYPES: &[&str] = &[
    "website",
    "article",
    "profile",
    "book",
    "video.movie",
    "video.episode",
];

pub const DEFAULT_TWITTER_REQUIRED: &[&str] =
    &["twitter:card", "twitter:title", "twitter:description"];

pub const DEFAULT_TWITTER_CARDS: &[&str] = &["summary", "summary_large_image", "app", "player"];

// ---- Structured data ----

pub const DEFAULT_WEBSITE_REQUIRED: &[&str] = &["name", "url"];

pub const DEFAULT_ARTICLE_REQUIRED: &[&str] = &["headline", "author"];

pub const DEFAULT_ARTICLE_RECOMMENDED: &[&str] = &["datePublished", "description"];

// ---- External validators ----

pub const DEFAULT_HTML_VALIDATOR: &str = "html5validator";

/// Default HTML validator timeout in seconds.
pub const DEFAULT_HTML_VALIDATOR_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_LINK_CHECKER: &str = "htmltest";

/// Default link checker timeout in seconds.
pub const DEFAULT_LINK_CHECKER_TIMEOUT_SECS: u64 = 30;

/// Link checker config file, relative to the project root.
pub const DEFAULT_LINK_CHECKER_CONFIG: &str = ".htmltest.yml";

pub const DEFAULT_HTTP_CLIENT: &str = "curl";

/// Per-URL probe timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

pub const DEFAULT_BOT_USER_AGENT: &str = "htmltest";

// ---- Assets ----

pub const DEFAULT_EMAIL_SCRAMBLER_JS: &str = "static/js/email-scrambler.js";
pub const DEFAULT_THEME_INIT_JS: &str = "static/js/theme-init.js";
pub const DEFAULT_THEME_TOGGLE_JS: &str = "static/js/theme-toggle.js";
pub const DEFAULT_MAIN_CSS: &str = "assets/css/main.css";

pub const DEFAULT_SCRAMBLE_SAMPLES: &[&str] = &[
    "test@example.com",
    "hello@world.dev",
    "first.last+tag@sub.example.org",
];

/// Default report format.
pub const DEFAULT_REPORT_FORMAT: &str = "console";
