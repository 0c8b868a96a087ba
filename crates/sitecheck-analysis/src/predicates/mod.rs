//! Predicate library: independent, stateless checks over parsed pages.
//!
//! Most predicates are rows of the catalog backed by a single-page check
//! function; title uniqueness needs every page at once and implements
//! `Predicate` directly.

pub mod accessibility;
pub mod catalog;
pub mod content;
pub mod corpus_wide;
pub mod dom;
pub mod links;
pub mod metadata;
pub mod page_predicate;
pub mod structure;
pub mod structured_data;
pub mod traits;
pub mod types;

pub use catalog::{default_catalog, select};
pub use page_predicate::{PageCheck, PagePredicate};
pub use traits::{CheckMode, PageTarget, Predicate, PredicateCategory};
pub use types::{Defect, Finding, Page, PredicateInfo, RuleSet};
