//! Embedded asset checks: script/stylesheet string rules and the email
//! scramble round-trip.

pub mod rules;
pub mod scrambler;

use std::path::{Path, PathBuf};

use sitecheck_core::config::AssetConfig;

use crate::enforcement::{timed, CheckResult, Severity, ViolationSink};
pub use rules::{check_asset, rules_for, AssetKind, AssetRule};
pub use scrambler::{round_trip_failures, scramble, unscramble};

pub const SCRAMBLER_ROUNDTRIP_CHECK: &str = "assets/scrambler-roundtrip";

/// Asset checks rooted at the project directory.
#[derive(Debug, Clone)]
pub struct AssetChecks {
    project_root: PathBuf,
    config: AssetConfig,
}

impl AssetChecks {
    pub fn new(project_root: &Path, config: &AssetConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config: config.clone(),
        }
    }

    pub fn check(&self, kind: AssetKind) -> CheckResult {
        let rel = kind.path(&self.config);
        check_asset(kind.check_id(), rel, &self.project_root.join(rel), rules_for(kind))
    }

    /// Round-trip every configured sample through scramble/unscramble.
    pub fn scrambler_round_trip(&self) -> CheckResult {
        let samples = self.config.effective_scramble_samples();
        let failures = round_trip_failures(&samples);
        if failures.is_empty() {
            return CheckResult::pass(
                SCRAMBLER_ROUNDTRIP_CHECK,
                samples.len(),
                format!("{} sample(s) round-trip", samples.len()),
            );
        }
        let mut sink = ViolationSink::new(SCRAMBLER_ROUNDTRIP_CHECK, Severity::Error);
        for f in failures {
            sink.push(
                self.config.effective_email_scrambler(),
                None,
                format!(
                    "\"{}\" scrambled to \"{}\" and unscrambled to \"{}\"",
                    f.sample, f.scrambled, f.unscrambled
                ),
            );
        }
        CheckResult::fail(SCRAMBLER_ROUNDTRIP_CHECK, samples.len(), sink.into_violations())
    }

    /// Every asset check, in order.
    pub fn run_all(&self) -> Vec<CheckResult> {
        let mut results: Vec<CheckResult> = AssetKind::all()
            .iter()
            .map(|k| timed(|| self.check(*k)))
            .collect();
        results.push(timed(|| self.scrambler_round_trip()));
        results
    }
}
