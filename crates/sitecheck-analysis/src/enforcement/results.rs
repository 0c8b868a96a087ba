//! Core result types: violations and per-check outcomes.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sitecheck_core::errors::CheckError;

/// Severity of a single violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One defect found in one document (or asset, or tool run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Unique within a result: `"{check_id}#{n}"`, 1-based.
    pub id: String,
    /// Corpus-relative path (project-relative for assets).
    pub file: String,
    pub line: Option<u32>,
    pub check_id: String,
    pub severity: Severity,
    pub message: String,
}

impl Violation {
    /// `path` or `path:line`.
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.file, line),
            None => self.file.clone(),
        }
    }
}

/// Outcome status of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    Warned,
    Skipped,
    Errored,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Warned => write!(f, "warned"),
            Self::Skipped => write!(f, "skipped"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// Result produced by each predicate, asset rule set, or external tool run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub status: CheckStatus,
    pub passed: bool,
    pub summary: String,
    /// In document-scan order.
    pub violations: Vec<Violation>,
    pub documents_checked: usize,
    pub execution_time_ms: u64,
    pub error: Option<String>,
}

impl CheckResult {
    /// Create a passing result.
    pub fn pass(check_id: &str, documents_checked: usize, summary: String) -> Self {
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Passed,
            passed: true,
            summary,
            violations: Vec::new(),
            documents_checked,
            execution_time_ms: 0,
            error: None,
        }
    }

    /// Create a failing result. Every violation is kept.
    pub fn fail(check_id: &str, documents_checked: usize, violations: Vec<Violation>) -> Self {
        let summary = count_summary(&violations);
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Failed,
            passed: false,
            summary,
            violations,
            documents_checked,
            execution_time_ms: 0,
            error: None,
        }
    }

    /// Create an advisory result: violations are reported but the check passes.
    pub fn warn(check_id: &str, documents_checked: usize, violations: Vec<Violation>) -> Self {
        let summary = format!("advisory: {}", count_summary(&violations));
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Warned,
            passed: true,
            summary,
            violations,
            documents_checked,
            execution_time_ms: 0,
            error: None,
        }
    }

    /// Create a skipped result.
    pub fn skipped(check_id: &str, reason: String) -> Self {
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Skipped,
            passed: true,
            summary: reason,
            violations: Vec::new(),
            documents_checked: 0,
            execution_time_ms: 0,
            error: None,
        }
    }

    /// Create an errored result: the check could not be evaluated.
    pub fn errored(check_id: &str, error: String) -> Self {
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Errored,
            passed: false,
            summary: format!("Check errored: {error}"),
            violations: Vec::new(),
            documents_checked: 0,
            execution_time_ms: 0,
            error: Some(error),
        }
    }

    /// Number of distinct files among the violations.
    pub fn violating_documents(&self) -> usize {
        self.violations
            .iter()
            .map(|v| v.file.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// The consolidated report: a header line, then one line per violation.
    ///
    /// ```text
    /// content/single-h1: 2 violation(s) in 2 document(s)
    ///   about/index.html: found 2 <h1> elements
    ///   writing/post.html:14: found 0 <h1> elements
    /// ```
    pub fn failure_report(&self) -> String {
        let mut out = format!(
            "{}: {} violation(s) in {} document(s)",
            self.check_id,
            self.violations.len(),
            self.violating_documents()
        );
        for v in &self.violations {
            out.push_str(&format!("\n  {}: {}", v.location(), v.message));
        }
        if let Some(ref error) = self.error {
            out.push_str(&format!("\n  {error}"));
        }
        out
    }

    /// Turn a failed or errored result into an error carrying the report.
    pub fn ensure_passed(&self) -> Result<(), CheckError> {
        match self.status {
            CheckStatus::Failed => Err(CheckError::AssertionFailed {
                check_id: self.check_id.clone(),
                report: self.failure_report(),
            }),
            CheckStatus::Errored => Err(CheckError::EvaluationFailed {
                check_id: self.check_id.clone(),
                message: self.error.clone().unwrap_or_default(),
            }),
            _ => Ok(()),
        }
    }
}

fn count_summary(violations: &[Violation]) -> String {
    let docs = violations
        .iter()
        .map(|v| v.file.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    format!("{} violation(s) in {} document(s)", violations.len(), docs)
}

/// Run `f` and stamp its wall time on the result.
pub fn timed(f: impl FnOnce() -> CheckResult) -> CheckResult {
    let start = Instant::now();
    let mut result = f();
    result.execution_time_ms = start.elapsed().as_millis() as u64;
    result
}

/// Whether every result passed (warned and skipped count as passing).
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.passed)
}

/// Builds violations for one check, numbering them in order.
pub struct ViolationSink {
    check_id: String,
    severity: Severity,
    violations: Vec<Violation>,
}

impl ViolationSink {
    pub fn new(check_id: &str, severity: Severity) -> Self {
        Self {
            check_id: check_id.to_string(),
            severity,
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, file: impl Into<String>, line: Option<u32>, message: impl Into<String>) {
        self.push_as(self.severity, file, line, message);
    }

    /// Push with a severity other than the sink's default.
    pub fn push_as(
        &mut self,
        severity: Severity,
        file: impl Into<String>,
        line: Option<u32>,
        message: impl Into<String>,
    ) {
        let n = self.violations.len() + 1;
        self.violations.push(Violation {
            id: format!("{}#{n}", self.check_id),
            file: file.into(),
            line,
            check_id: self.check_id.clone(),
            severity,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
