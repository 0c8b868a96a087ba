//! Predicate trait and category/mode enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{Finding, Page, PredicateInfo, RuleSet};

/// Trait that every predicate implements.
///
/// Predicates are stateless and deterministic: evaluating the same pages
/// twice yields identical findings in identical order.
pub trait Predicate: Send + Sync {
    /// Static metadata: id, category, mode, exemptions, target.
    fn info(&self) -> &PredicateInfo;

    /// Evaluate over every applicable page, in scan order.
    fn evaluate(&self, pages: &[Page<'_>], rules: &RuleSet) -> Vec<Finding>;

    fn id(&self) -> &'static str {
        self.info().id
    }
}

/// The predicate categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PredicateCategory {
    Structure,
    Accessibility,
    Links,
    Content,
    Metadata,
    StructuredData,
}

impl PredicateCategory {
    pub fn all() -> &'static [PredicateCategory] {
        &[
            Self::Structure,
            Self::Accessibility,
            Self::Links,
            Self::Content,
            Self::Metadata,
            Self::StructuredData,
        ]
    }

    /// Id prefix used by predicates in this category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Accessibility => "a11y",
            Self::Links => "links",
            Self::Content => "content",
            Self::Metadata => "meta",
            Self::StructuredData => "jsonld",
        }
    }
}

impl fmt::Display for PredicateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredicateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structure" | "structural" => Ok(Self::Structure),
            "a11y" | "accessibility" => Ok(Self::Accessibility),
            "links" => Ok(Self::Links),
            "content" => Ok(Self::Content),
            "meta" | "metadata" => Ok(Self::Metadata),
            "jsonld" | "structured-data" | "structured_data" => Ok(Self::StructuredData),
            other => Err(format!("unknown predicate category: {other}")),
        }
    }
}

/// Whether violations fail the run or only produce advisory output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    Enforced,
    Advisory,
}

impl fmt::Display for CheckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enforced => write!(f, "enforced"),
            Self::Advisory => write!(f, "advisory"),
        }
    }
}

/// Which documents a predicate inspects, before exemptions are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageTarget {
    AllPages,
    /// The corpus root `index.html` only.
    Homepage,
    /// Non-index pages under a configured blog section.
    BlogPosts,
}
