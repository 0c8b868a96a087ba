//! Scanner subsystem: corpus discovery and content hashing.
//!
//! The scanner is the entry point of a check session. It verifies the
//! generated corpus exists, discovers every matching document once, and
//! hands out a read-only, path-sorted listing shared by all predicates.

pub mod corpus;
pub mod hasher;
pub mod types;
pub mod walker;

pub use corpus::Corpus;
pub use types::{CorpusEntry, CorpusStats};
