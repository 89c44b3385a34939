//! Whole-document validation
//!
//! Parse once, run every check, hand back a structured report. A missing
//! file and malformed XML are distinct early failures; no check runs on a
//! document that did not parse.

use std::fs;
use std::path::Path;

use roxmltree::Document;

use crate::checks;
use crate::error::{Error, Result};
use crate::process::CommandRunner;
use crate::result::ValidationReport;
use crate::schema;

/// Validate the XML file at `path`.
pub fn validate_file(path: &Path, runner: &dyn CommandRunner) -> Result<ValidationReport> {
    if !path.exists() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    validate_content(&path.display().to_string(), &content, runner)
}

/// Validate already-loaded document text; `source` only labels the report.
pub fn validate_content(
    source: &str,
    content: &str,
    runner: &dyn CommandRunner,
) -> Result<ValidationReport> {
    let doc = Document::parse(content).map_err(|e| Error::ParseError(e.to_string()))?;

    let mut results = vec![schema::check_schema(content, runner)?];
    results.extend(checks::run_document_checks(&doc));

    Ok(ValidationReport {
        source: source.to_string(),
        checks: results,
    })
}
