//! Exemption classifier: path-based opt-outs scoped per predicate class.

pub mod classifier;

pub use classifier::{ExemptionCategory, ExemptionRules};
