//! Console reporter: human-readable output with color codes.

use super::Reporter;
use crate::enforcement::results::{CheckResult, CheckStatus, Severity};
use crate::enforcement::suite::SuiteSummary;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_symbol(&self, status: &CheckStatus) -> &'static str {
        match status {
            CheckStatus::Passed => "✓",
            CheckStatus::Failed => "✗",
            CheckStatus::Warned => "⚠",
            CheckStatus::Skipped => "⊘",
            CheckStatus::Errored => "⚡",
        }
    }

    fn color_start(&self, severity: &Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Error => "\x1b[31m",   // red
            Severity::Warning => "\x1b[33m", // yellow
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, results: &[CheckResult]) -> Result<String, String> {
        let mut output = String::new();

        output.push_str("╔══════════════════════════════════════════╗\n");
        output.push_str("║          sitecheck Corpus Report         ║\n");
        output.push_str("╚══════════════════════════════════════════╝\n\n");

        for result in results {
            let symbol = self.status_symbol(&result.status);
            output.push_str(&format!("{} {}: {}\n", symbol, result.check_id, result.summary));

            for violation in &result.violations {
                let cs = self.color_start(&violation.severity);
                let ce = self.color_end();
                // Tool output spans many lines; keep it indented under the check.
                let message = violation.message.replace('\n', "\n      ");
                output.push_str(&format!(
                    "  {}{}{}: {}: {}\n",
                    cs,
                    violation.severity,
                    ce,
                    violation.location(),
                    message,
                ));
            }

            if let Some(ref error) = result.error {
                output.push_str(&format!("  {error}\n"));
            }
        }

        let summary = SuiteSummary::from_results(results);
        output.push_str(&format!(
            "\n─── Summary: {}/{} checks passed, {} failed, {} warned, {} skipped, {} errored, {} violations ───\n",
            summary.passed + summary.warned + summary.skipped,
            summary.total,
            summary.failed,
            summary.warned,
            summary.skipped,
            summary.errored,
            summary.violations,
        ));

        if results.iter().all(|r| r.passed) {
            output.push_str("Result: PASSED ✓\n");
        } else {
            output.push_str("Result: FAILED ✗\n");
        }

        Ok(output)
    }
}
