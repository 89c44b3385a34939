//! Generator scenario battery
//!
//! Each scenario invokes the coverage generator with one combination of
//! flags, captures its XML output to a temporary artifact, validates the
//! artifact, and deletes it before the next scenario starts. A failing
//! scenario never stops the rest of the battery.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::process::CommandRunner;
use crate::result::ValidationReport;
use crate::validator;

/// One named combination of generator flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub args: Vec<String>,
}

impl Scenario {
    fn new(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// The fixed battery covering the generator's flag surface.
pub fn builtin_scenarios(xcresult: &Path) -> Vec<Scenario> {
    let input = xcresult.display().to_string();
    vec![
        Scenario::new("Default Output", &[input.as_str(), "-o", "cobertura"]),
        Scenario::new(
            "With Coverage Base Path",
            &[
                input.as_str(),
                "-o",
                "cobertura",
                "--coverage-base-path",
                "/workspace/myproject",
                "--sources-root",
                ".",
            ],
        ),
        Scenario::new(
            "With Sources Root",
            &[input.as_str(), "-o", "cobertura", "--sources-root", "src"],
        ),
        Scenario::new(
            "With Path Exclusions",
            &[
                input.as_str(),
                "-o",
                "cobertura",
                "--excluded-path",
                "TestSupport",
                "--excluded-path",
                "Tests",
            ],
        ),
        Scenario::new(
            "Backward Compatibility (project-root)",
            &[input.as_str(), "-o", "cobertura", "-p", "/legacy/project"],
        ),
    ]
}

/// What happened to one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    /// Validation report, when the generator produced a document
    pub report: Option<ValidationReport>,
    /// Generator launch/exit failure or an unreadable document
    pub failure: Option<String>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.failure.is_none() && self.report.as_ref().is_some_and(ValidationReport::passed)
    }

    fn failed(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            report: None,
            failure: Some(message),
        }
    }
}

/// Runs scenarios against a generator binary
pub struct ScenarioRunner<'a> {
    generator: PathBuf,
    runner: &'a dyn CommandRunner,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(generator: impl Into<PathBuf>, runner: &'a dyn CommandRunner) -> Self {
        Self {
            generator: generator.into(),
            runner,
        }
    }

    pub fn generator_available(&self) -> bool {
        self.runner.available(&self.generator.display().to_string())
    }

    /// Run every scenario in order, one temporary artifact at a time.
    pub fn run_battery(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let total = scenarios.len();
        let mut outcomes = Vec::with_capacity(total);

        for (idx, scenario) in scenarios.iter().enumerate() {
            eprintln!("[{}/{}] Scenario: {}", idx + 1, total, scenario.name);
            outcomes.push(self.run_scenario(scenario));
        }

        outcomes
    }

    fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        let program = self.generator.display().to_string();
        let output = match self.runner.run(&program, &scenario.args) {
            Ok(out) => out,
            Err(e) => return ScenarioOutcome::failed(&scenario.name, e.to_string()),
        };
        if !output.success() {
            return ScenarioOutcome::failed(
                &scenario.name,
                format!("generator failed: {}", output.stderr.trim()),
            );
        }

        let artifact = match self.write_artifact(&output.stdout) {
            Ok(f) => f,
            Err(e) => {
                return ScenarioOutcome::failed(
                    &scenario.name,
                    format!("could not stage generator output: {e}"),
                );
            }
        };

        let outcome = match validator::validate_file(artifact.path(), self.runner) {
            Ok(report) => ScenarioOutcome {
                name: scenario.name.clone(),
                report: Some(report),
                failure: None,
            },
            Err(e) => ScenarioOutcome::failed(&scenario.name, e.to_string()),
        };

        // Cleanup is best-effort, but a leaked artifact is worth a line.
        if let Err(e) = artifact.close() {
            eprintln!("warning: failed to delete temporary artifact: {e}");
        }

        outcome
    }

    fn write_artifact(&self, content: &str) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::with_suffix(".xml")?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }
}
