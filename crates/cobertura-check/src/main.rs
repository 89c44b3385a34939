//! Validate Cobertura XML coverage reports.
//!
//! Two modes: validate one XML file, or run the full generator scenario
//! battery (`--run-all-tests`). Exit code 0 means everything requested
//! passed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;

use cobertura_conformance::{
    builtin_scenarios, render_validation, validate_file, BatteryReport, ScenarioRunner,
    SystemRunner,
};

#[derive(Parser, Debug)]
#[command(
    name = "cobertura-check",
    version,
    about = "Validate Cobertura XML output for coverage-04 DTD compliance"
)]
struct Cli {
    /// Path to an XML file to validate
    #[arg(
        value_name = "XML_FILE",
        required_unless_present = "run_all_tests",
        conflicts_with = "run_all_tests"
    )]
    xml_file: Option<PathBuf>,

    /// Run the full scenario battery against the generator instead
    #[arg(long)]
    run_all_tests: bool,

    /// Coverage generator binary invoked by the battery
    #[arg(long, default_value = ".build/release/xcresultparser")]
    generator: PathBuf,

    /// Result bundle fed to the generator in each scenario
    #[arg(long, default_value = "test.xcresult")]
    xcresult: PathBuf,

    /// Output machine-readable JSON (battery mode)
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let runner = SystemRunner;

    if cli.run_all_tests {
        return run_battery(cli, &runner);
    }

    // Mutual exclusion in clap guarantees the positional is present here.
    let Some(xml_file) = cli.xml_file.as_deref() else {
        bail!("no XML file given");
    };
    let report = validate_file(xml_file, &runner)?;
    print!("{}", render_validation(&report));
    Ok(report.passed())
}

fn run_battery(cli: &Cli, runner: &SystemRunner) -> anyhow::Result<bool> {
    let scenario_runner = ScenarioRunner::new(&cli.generator, runner);
    if !scenario_runner.generator_available() {
        bail!(
            "generator not found: {}; build it first: swift build -c release",
            cli.generator.display()
        );
    }

    let scenarios = builtin_scenarios(&cli.xcresult);
    let outcomes = scenario_runner.run_battery(&scenarios);

    for outcome in &outcomes {
        if let Some(report) = &outcome.report {
            print!("{}", render_validation(report));
        }
    }

    let report = BatteryReport::new(&cli.generator.display().to_string(), outcomes);
    if cli.json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }

    Ok(report.passed())
}
