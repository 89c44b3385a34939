//! Report rendering
//!
//! Checks return structured results; everything user-facing is produced
//! here, as console text for single documents and as a text/markdown/JSON
//! summary for battery runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::{CheckOutcome, ValidationReport};
use crate::scenario::ScenarioOutcome;

/// Render a per-document report as console text.
pub fn render_validation(report: &ValidationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Validating: {}\n", report.source));
    for check in &report.checks {
        match &check.outcome {
            CheckOutcome::Pass => out.push_str(&format!("  PASS {}\n", check.check)),
            CheckOutcome::Fail => out.push_str(&format!("  FAIL {}\n", check.check)),
            CheckOutcome::Skipped(reason) => {
                out.push_str(&format!("  SKIP {} ({})\n", check.check, reason));
            }
        }
        for v in &check.violations {
            let prefix = match v.severity {
                crate::result::Severity::Error => "error",
                crate::result::Severity::Warning => "warning",
            };
            out.push_str(&format!("       {prefix}: {}: {}", v.location, v.message));
            if let (Some(expected), Some(actual)) = (&v.expected, &v.actual) {
                out.push_str(&format!(" (expected '{expected}', got '{actual}')"));
            }
            out.push('\n');
        }
    }

    if report.passed() {
        out.push_str("ALL VALIDATIONS PASSED\n");
    } else {
        out.push_str("VALIDATION FAILED\n");
    }

    out
}

/// Summary counts for a battery run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterySummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

impl BatterySummary {
    pub fn from_outcomes(outcomes: &[ScenarioOutcome]) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        let failed = total - passed;
        let pass_rate = if total > 0 {
            (passed as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total,
            passed,
            failed,
            pass_rate,
        }
    }
}

/// Full report for one battery run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryReport {
    pub timestamp: DateTime<Utc>,
    pub generator: String,
    pub summary: BatterySummary,
    pub scenarios: Vec<ScenarioOutcome>,
}

impl BatteryReport {
    pub fn new(generator: &str, scenarios: Vec<ScenarioOutcome>) -> Self {
        let summary = BatterySummary::from_outcomes(&scenarios);
        Self {
            timestamp: Utc::now(),
            generator: generator.to_string(),
            summary,
            scenarios,
        }
    }

    pub fn passed(&self) -> bool {
        self.summary.failed == 0
    }

    /// Per-scenario pass/fail table for the console.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str("SCENARIO SUMMARY\n");
        out.push_str(&format!(
            "Scenarios passed: {}/{}\n",
            self.summary.passed, self.summary.total
        ));
        for outcome in &self.scenarios {
            let status = if outcome.passed() { "PASS" } else { "FAIL" };
            out.push_str(&format!("  {status} {}", outcome.name));
            if let Some(failure) = &outcome.failure {
                out.push_str(&format!(" ({failure})"));
            }
            out.push('\n');
        }
        if self.passed() {
            out.push_str("ALL SCENARIOS PASSED\n");
        } else {
            out.push_str(&format!("{} scenario(s) failed\n", self.summary.failed));
        }

        out
    }

    /// Generate a markdown report
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Cobertura Conformance Report\n\n");
        md.push_str(&format!("**Generator:** {}\n", self.generator));
        md.push_str(&format!(
            "**Date:** {}\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Count |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Total | {} |\n", self.summary.total));
        md.push_str(&format!("| Passed | {} |\n", self.summary.passed));
        md.push_str(&format!("| Failed | {} |\n", self.summary.failed));
        md.push_str(&format!(
            "| **Pass Rate** | **{:.2}%** |\n\n",
            self.summary.pass_rate
        ));

        md.push_str("## Scenarios\n\n");
        md.push_str("| Scenario | Outcome | Detail |\n");
        md.push_str("|----------|---------|--------|\n");
        for outcome in &self.scenarios {
            let status = if outcome.passed() { "pass" } else { "fail" };
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                outcome.name,
                status,
                outcome.failure.as_deref().unwrap_or("-")
            ));
        }

        md
    }

    /// Generate a JSON report
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
