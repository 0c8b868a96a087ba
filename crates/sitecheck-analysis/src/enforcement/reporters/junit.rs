//! JUnit XML reporter.
//!
//! Each check is a `<testsuite>`; each violation a `<testcase>` with a
//! `<failure>`. Passing and skipped checks produce a single testcase;
//! errored checks a testcase with `<error>`.

use super::Reporter;
use crate::enforcement::results::{CheckResult, CheckStatus, Severity};

pub struct JUnitReporter;

impl JUnitReporter {
    pub fn new() -> Self {
        Self
    }

    /// Escape markup and drop control characters XML 1.0 cannot carry,
    /// such as the ANSI escapes some validators color their output with.
    fn escape_xml(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&apos;"),
                '\t' | '\n' | '\r' => out.push(c),
                c if c < ' ' => {}
                c => out.push(c),
            }
        }
        out
    }

    /// Advisory violations are not failures.
    fn failure_count(result: &CheckResult) -> usize {
        if result.passed {
            0
        } else {
            result
                .violations
                .iter()
                .filter(|v| v.severity == Severity::Error)
                .count()
        }
    }

    fn error_count(result: &CheckResult) -> usize {
        usize::from(result.status == CheckStatus::Errored)
    }

    fn test_count(result: &CheckResult) -> usize {
        result.violations.len().max(1)
    }
}

impl Default for JUnitReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JUnitReporter {
    fn name(&self) -> &'static str {
        "junit"
    }

    fn generate(&self, results: &[CheckResult]) -> Result<String, String> {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let total_tests: usize = results.iter().map(Self::test_count).sum();
        let total_failures: usize = results.iter().map(Self::failure_count).sum();
        let total_errors: usize = results.iter().map(Self::error_count).sum();
        let total_time: f64 = results.iter().map(|r| r.execution_time_ms as f64 / 1000.0).sum();

        xml.push_str(&format!(
            "<testsuites name=\"sitecheck\" tests=\"{}\" failures=\"{}\" errors=\"{}\" time=\"{:.3}\">\n",
            total_tests, total_failures, total_errors, total_time
        ));

        for result in results {
            let suite_time = result.execution_time_ms as f64 / 1000.0;
            let id = Self::escape_xml(&result.check_id);
            xml.push_str(&format!(
                "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" time=\"{:.3}\">\n",
                id,
                Self::test_count(result),
                Self::failure_count(result),
                Self::error_count(result),
                suite_time
            ));

            if result.violations.is_empty() {
                xml.push_str(&format!(
                    "    <testcase name=\"{}\" classname=\"sitecheck.{}\" time=\"{:.3}\"",
                    Self::escape_xml(&result.summary),
                    id,
                    suite_time
                ));
                match result.status {
                    CheckStatus::Skipped => {
                        xml.push_str(">\n");
                        xml.push_str(&format!(
                            "      <skipped message=\"{}\" />\n",
                            Self::escape_xml(&result.summary)
                        ));
                        xml.push_str("    </testcase>\n");
                    }
                    CheckStatus::Errored => {
                        xml.push_str(">\n");
                        xml.push_str(&format!(
                            "      <error message=\"{}\" />\n",
                            Self::escape_xml(result.error.as_deref().unwrap_or(""))
                        ));
                        xml.push_str("    </testcase>\n");
                    }
                    _ => xml.push_str(" />\n"),
                }
            } else {
                let failing = !result.passed;
                for violation in &result.violations {
                    xml.push_str(&format!(
                        "    <testcase name=\"{}\" classname=\"sitecheck.{}\" time=\"0.000\"",
                        Self::escape_xml(&violation.location()),
                        id
                    ));
                    if failing && violation.severity == Severity::Error {
                        xml.push_str(">\n");
                        xml.push_str(&format!(
                            "      <failure message=\"{}\" type=\"{}\">{}</failure>\n",
                            Self::escape_xml(violation.message.lines().next().unwrap_or("")),
                            violation.severity,
                            Self::escape_xml(&violation.message)
                        ));
                        xml.push_str("    </testcase>\n");
                    } else {
                        xml.push_str(">\n");
                        xml.push_str(&format!(
                            "      <system-out>{}: {}</system-out>\n",
                            violation.severity,
                            Self::escape_xml(&violation.message)
                        ));
                        xml.push_str("    </testcase>\n");
                    }
                }
            }

            xml.push_str("  </testsuite>\n");
        }

        xml.push_str("</testsuites>\n");
        Ok(xml)
    }
}
