//! Root `coverage` attribute rules
//!
//! Attribute presence, count/rate formats, and the generator version marker.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::Node;

use crate::result::{CheckResult, Violation};

pub const CHECK_NAME: &str = "root-attributes";

/// Attributes the DTD requires on the root element.
pub const REQUIRED_ATTRS: [&str; 9] = [
    "line-rate",
    "branch-rate",
    "lines-covered",
    "lines-valid",
    "branches-covered",
    "branches-valid",
    "complexity",
    "version",
    "timestamp",
];

/// Attributes that must be plain non-negative decimal integers.
const COUNT_ATTRS: [&str; 6] = [
    "lines-covered",
    "lines-valid",
    "branches-covered",
    "branches-valid",
    "timestamp",
    "complexity",
];

/// Attributes that must be fixed-point decimals.
const RATE_ATTRS: [&str; 2] = ["line-rate", "branch-rate"];

/// Marker the generator stamps into the version attribute.
const VERSION_MARKER: &str = "xcresultparser";
/// Marker of the ambiguous legacy generator; must never appear.
const LEGACY_MARKER: &str = "diff_coverage";

static RATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d{6}$").expect("rate pattern"));

/// Digit-only string, rejecting sign, point, exponent, and empty values.
pub fn is_count(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Fixed-point decimal with exactly six fractional digits and no exponent.
pub fn is_fixed_rate(value: &str) -> bool {
    !value.contains(['e', 'E']) && RATE_RE.is_match(value)
}

pub fn check(root: Node) -> CheckResult {
    let mut violations = Vec::new();

    for attr in REQUIRED_ATTRS {
        if !root.has_attribute(attr) {
            violations.push(Violation::error(
                format!("coverage/@{attr}"),
                format!("missing required attribute: {attr}"),
            ));
        }
    }

    for attr in COUNT_ATTRS {
        let value = root.attribute(attr).unwrap_or("");
        if !is_count(value) {
            violations.push(
                Violation::error(
                    format!("coverage/@{attr}"),
                    format!("{attr} should be a non-negative integer"),
                )
                .with_values("decimal digits", value),
            );
        }
    }

    for attr in RATE_ATTRS {
        let value = root.attribute(attr).unwrap_or("");
        if value.contains(['e', 'E']) {
            violations.push(
                Violation::error(
                    format!("coverage/@{attr}"),
                    format!("{attr} must not use scientific notation"),
                )
                .with_values("digits.digits", value),
            );
        } else if !RATE_RE.is_match(value) {
            violations.push(
                Violation::error(
                    format!("coverage/@{attr}"),
                    format!("{attr} should be a decimal with six fractional digits"),
                )
                .with_values("X.XXXXXX", value),
            );
        }
    }

    let version = root.attribute("version").unwrap_or("");
    if version.contains(LEGACY_MARKER) {
        violations.push(
            Violation::error(
                "coverage/@version",
                format!("version contains ambiguous '{LEGACY_MARKER}'"),
            )
            .with_values(format!("no '{LEGACY_MARKER}'"), version),
        );
    } else if !version.contains(VERSION_MARKER) {
        violations.push(
            Violation::error(
                "coverage/@version",
                format!("version should contain '{VERSION_MARKER}'"),
            )
            .with_values(format!("contains '{VERSION_MARKER}'"), version),
        );
    }

    CheckResult::from_violations(CHECK_NAME, violations)
}
