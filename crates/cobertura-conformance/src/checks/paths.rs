//! Path hygiene (advisory)
//!
//! Class filenames that still look like absolute paths from a development
//! machine usually mean the generator ran without path normalization.
//! Findings are warnings; they never fail a run.

use roxmltree::Node;

use crate::result::{CheckResult, Violation};

pub const CHECK_NAME: &str = "path-hygiene";

/// At most this many offending paths are listed per document.
const REPORT_LIMIT: usize = 3;

fn looks_unnormalized(filename: &str) -> bool {
    (filename.starts_with("/Users/") && filename.contains("/Development/"))
        || (filename.starts_with("/home/") && filename.contains("project"))
}

pub fn check(root: Node) -> CheckResult {
    let offending: Vec<&str> = root
        .descendants()
        .filter(|n| n.has_tag_name("class"))
        .filter_map(|n| n.attribute("filename"))
        .filter(|f| looks_unnormalized(f))
        .collect();

    let violations = offending
        .iter()
        .take(REPORT_LIMIT)
        .map(|path| {
            Violation::warning(
                "class/@filename",
                format!(
                    "unnormalized absolute path: {path}; \
                     consider --coverage-base-path for path normalization"
                ),
            )
        })
        .collect();

    CheckResult::from_violations(CHECK_NAME, violations)
}
