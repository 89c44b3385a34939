//! Result types for conformance checks

use serde::{Deserialize, Serialize};

/// Severity of a single finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Fails the check it was found by
    Error,
    /// Reported but never fails a check
    Warning,
}

/// A single conformance finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Element/attribute the finding is about, e.g. `coverage/@timestamp`
    pub location: String,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub severity: Severity,
}

impl Violation {
    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            expected: None,
            actual: None,
            severity: Severity::Error,
        }
    }

    pub fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
            expected: None,
            actual: None,
            severity: Severity::Warning,
        }
    }

    pub fn with_values(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// Check ran and found no hard violations
    Pass,
    /// Check ran and found at least one hard violation
    Fail,
    /// Check could not run in this environment, with reason
    Skipped(String),
}

impl CheckOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckOutcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckOutcome::Fail)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, CheckOutcome::Skipped(_))
    }
}

/// Result of running a single check over one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check identifier, e.g. `root-attributes`
    pub check: String,
    pub outcome: CheckOutcome,
    /// All findings, hard violations and warnings alike
    pub violations: Vec<Violation>,
}

impl CheckResult {
    /// Build a result from collected findings; the outcome is `Fail` iff
    /// any finding is error-severity.
    pub fn from_violations(check: &str, violations: Vec<Violation>) -> Self {
        let failed = violations.iter().any(|v| v.severity == Severity::Error);
        Self {
            check: check.to_string(),
            outcome: if failed {
                CheckOutcome::Fail
            } else {
                CheckOutcome::Pass
            },
            violations,
        }
    }

    pub fn skipped(check: &str, reason: impl Into<String>) -> Self {
        Self {
            check: check.to_string(),
            outcome: CheckOutcome::Skipped(reason.into()),
            violations: Vec::new(),
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }
}

/// Aggregate result of all checks over one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Path of the validated document
    pub source: String,
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    /// Overall verdict: no check failed. Warnings and skipped checks do
    /// not count against the document.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| !c.outcome.is_fail())
    }

    /// Every error-severity finding across all checks.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.checks
            .iter()
            .flat_map(|c| c.violations.iter())
            .filter(|v| v.severity == Severity::Error)
    }

    /// Every warning-severity finding across all checks.
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.checks
            .iter()
            .flat_map(|c| c.violations.iter())
            .filter(|v| v.severity == Severity::Warning)
    }
}
