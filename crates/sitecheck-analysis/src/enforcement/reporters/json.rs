//! JSON reporter: structured JSON output.

use serde_json::json;

use super::Reporter;
use crate::enforcement::results::CheckResult;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, results: &[CheckResult]) -> Result<String, String> {
        let checks: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                json!({
                    "check_id": r.check_id,
                    "status": r.status,
                    "passed": r.passed,
                    "summary": r.summary,
                    "documents_checked": r.documents_checked,
                    "violation_count": r.violations.len(),
                    "violations": r.violations.iter().map(|v| json!({
                        "id": v.id,
                        "file": v.file,
                        "line": v.line,
                        "severity": v.severity,
                        "message": v.message,
                    })).collect::<Vec<_>>(),
                    "execution_time_ms": r.execution_time_ms,
                    "error": r.error,
                })
            })
            .collect();

        let total_violations: usize = results.iter().map(|r| r.violations.len()).sum();
        let all_passed = results.iter().all(|r| r.passed);

        let output = json!({
            "overall_passed": all_passed,
            "total_violations": total_violations,
            "check_count": results.len(),
            "checks": checks,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
