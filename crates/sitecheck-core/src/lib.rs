//! sitecheck-core: errors, configuration, tracing, and constants shared by
//! the sitecheck analysis crate and CLI.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
