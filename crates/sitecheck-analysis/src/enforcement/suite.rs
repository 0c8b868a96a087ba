//! Check suite orchestrator: predicates, then asset and external checks.

use tracing::info;

use super::results::{CheckResult, CheckStatus};
use super::runner::AssertionRunner;
use crate::assets::AssetChecks;
use crate::external::ExternalChecks;
use crate::predicates::Predicate;

/// An ordered list of checks over one session.
pub struct CheckSuite {
    predicates: Vec<Box<dyn Predicate>>,
    assets: Option<AssetChecks>,
    external: Option<ExternalChecks>,
}

impl CheckSuite {
    /// A suite running `predicates` in the given order.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            assets: None,
            external: None,
        }
    }

    /// Also run the asset rules and scramble round-trip.
    pub fn with_assets(mut self, assets: AssetChecks) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Also run the out-of-process validators.
    pub fn with_external(mut self, external: ExternalChecks) -> Self {
        self.external = Some(external);
        self
    }

    pub fn predicates(&self) -> &[Box<dyn Predicate>] {
        &self.predicates
    }

    /// Run every check in order and return all results. Nothing stops early:
    /// one failing check never hides another.
    pub fn run(&self, runner: &AssertionRunner) -> Vec<CheckResult> {
        let mut results: Vec<CheckResult> = self
            .predicates
            .iter()
            .map(|p| runner.evaluate(p.as_ref()))
            .collect();

        if let Some(ref assets) = self.assets {
            results.extend(assets.run_all());
        }
        if let Some(ref external) = self.external {
            results.extend(external.run_all());
        }

        let summary = SuiteSummary::from_results(&results);
        info!(
            checks = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            warned = summary.warned,
            skipped = summary.skipped,
            errored = summary.errored,
            cache_hits = runner.cache().hits(),
            cache_misses = runner.cache().misses(),
            "check suite finished"
        );
        results
    }
}

/// Counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warned: usize,
    pub skipped: usize,
    pub errored: usize,
    pub violations: usize,
}

impl SuiteSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut s = Self {
            total: results.len(),
            ..Default::default()
        };
        for r in results {
            match r.status {
                CheckStatus::Passed => s.passed += 1,
                CheckStatus::Failed => s.failed += 1,
                CheckStatus::Warned => s.warned += 1,
                CheckStatus::Skipped => s.skipped += 1,
                CheckStatus::Errored => s.errored += 1,
            }
            s.violations += r.violations.len();
        }
        s
    }
}
