//! Document checks
//!
//! Each submodule is one independent predicate over a parsed coverage tree.
//! Checks never abort on the first finding; they collect every violation so
//! a report covers the whole document.

pub mod invariants;
pub mod paths;
pub mod root_attrs;
pub mod structure;

use roxmltree::Document;

use crate::result::CheckResult;

/// Run every document-level check, in a fixed order.
///
/// The checks are order-independent; the fixed order only keeps reports
/// stable across runs.
pub fn run_document_checks(doc: &Document) -> Vec<CheckResult> {
    let root = doc.root_element();
    vec![
        root_attrs::check(root),
        structure::check(root),
        invariants::check(root),
        paths::check(root),
    ]
}
