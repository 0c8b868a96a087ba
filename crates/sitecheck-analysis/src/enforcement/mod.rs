//! Enforcement: the aggregating assertion runner, the check suite, and
//! reporters.

pub mod reporters;
pub mod results;
pub mod runner;
pub mod suite;

pub use reporters::{available_formats, create_reporter, Reporter};
pub use results::{all_passed, timed, CheckResult, CheckStatus, Severity, Violation, ViolationSink};
pub use runner::AssertionRunner;
pub use suite::{CheckSuite, SuiteSummary};
