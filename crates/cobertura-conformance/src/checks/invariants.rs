//! Fixed branch-coverage values
//!
//! The generator does not track branch coverage, so every branch attribute
//! is emitted as a literal zero. Any other value means the numbers were
//! computed from somewhere they should not have been.

use roxmltree::Node;

use crate::result::{CheckResult, Violation};

pub const CHECK_NAME: &str = "branch-invariants";

const ZERO_COUNT: &str = "0";
const ZERO_RATE: &str = "0.000000";

pub fn check(root: Node) -> CheckResult {
    let mut violations = Vec::new();

    for attr in ["branches-covered", "branches-valid"] {
        let value = root.attribute(attr).unwrap_or("");
        if value != ZERO_COUNT {
            violations.push(
                Violation::error(
                    format!("coverage/@{attr}"),
                    format!("{attr} should be {ZERO_COUNT}"),
                )
                .with_values(ZERO_COUNT, value),
            );
        }
    }

    let branch_rate = root.attribute("branch-rate").unwrap_or("");
    if branch_rate != ZERO_RATE {
        violations.push(
            Violation::error(
                "coverage/@branch-rate",
                format!("branch-rate should be {ZERO_RATE}"),
            )
            .with_values(ZERO_RATE, branch_rate),
        );
    }

    for node in root.descendants().filter(Node::is_element) {
        let tag = node.tag_name().name();
        if tag != "package" && tag != "class" {
            continue;
        }
        let value = node.attribute("branch-rate").unwrap_or("");
        if value != ZERO_RATE {
            let name = node.attribute("name").unwrap_or("?");
            violations.push(
                Violation::error(
                    format!("{tag}[{name}]/@branch-rate"),
                    format!("{tag} branch-rate should be {ZERO_RATE}"),
                )
                .with_values(ZERO_RATE, value),
            );
        }
    }

    CheckResult::from_violations(CHECK_NAME, violations)
}
