//! sitecheck-analysis: validation of a generated static-site corpus.
//!
//! The corpus is loaded once, each page parsed at most once through a
//! session cache, and every predicate evaluated across all applicable pages
//! with every violation aggregated into a single result.

pub mod assets;
pub mod enforcement;
pub mod exemptions;
pub mod external;
pub mod parsers;
pub mod predicates;
pub mod scanner;
