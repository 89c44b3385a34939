//! Document check tests
//!
//! Exercises each check against a known-good fixture and targeted
//! mutations of it.

use cobertura_conformance::checks::{invariants, paths, root_attrs, structure};
use cobertura_conformance::{CheckOutcome, Severity};

const VALID_XML: &str = r#"<?xml version="1.0"?>
<coverage line-rate="0.847458" branch-rate="0.000000" lines-covered="50" lines-valid="59" branches-covered="0" branches-valid="0" complexity="0" version="xcresultparser 1.8.1" timestamp="1722340000">
    <sources>
        <source>/workspace/myproject</source>
    </sources>
    <packages>
        <package name="MyApp" line-rate="0.800000" branch-rate="0.000000" complexity="0">
            <classes>
                <class name="ContentView" filename="Sources/ContentView.swift" line-rate="0.900000" branch-rate="0.000000" complexity="0">
                    <methods>
                        <method name="body" signature="()" line-rate="1.000000" branch-rate="0.000000" complexity="0">
                            <lines>
                                <line number="10" hits="4"/>
                            </lines>
                        </method>
                    </methods>
                    <lines>
                        <line number="10" hits="4"/>
                        <line number="11" hits="0"/>
                    </lines>
                </class>
            </classes>
        </package>
    </packages>
</coverage>"#;

fn parse(xml: &str) -> roxmltree::Document<'_> {
    roxmltree::Document::parse(xml).expect("fixture should be well-formed XML")
}

/// Root element with every required attribute and the given children.
fn minimal_root(children: &str) -> String {
    format!(
        r#"<coverage line-rate="0.000000" branch-rate="0.000000" lines-covered="0" lines-valid="0" branches-covered="0" branches-valid="0" complexity="0" version="xcresultparser 1.8.1" timestamp="1722340000">{children}</coverage>"#
    )
}

// ============== Root Attribute Tests ==============

#[test]
fn valid_document_passes_root_attributes() {
    let doc = parse(VALID_XML);
    let result = root_attrs::check(doc.root_element());
    assert!(
        result.outcome.is_pass(),
        "expected pass, got {:?}",
        result.violations
    );
}

#[test]
fn missing_root_attribute_is_named() {
    let mutated = VALID_XML.replace(r#" timestamp="1722340000""#, "");
    let doc = parse(&mutated);
    let result = root_attrs::check(doc.root_element());
    assert!(result.outcome.is_fail());
    assert!(
        result
            .violations
            .iter()
            .any(|v| v.location == "coverage/@timestamp" && v.message.contains("missing")),
        "missing timestamp should be reported by name"
    );
    // No other required attribute is reported missing.
    assert!(!result
        .violations
        .iter()
        .any(|v| v.message.contains("missing") && !v.location.contains("timestamp")));
}

#[test]
fn non_integer_timestamp_fails() {
    let mutated = VALID_XML.replace(r#"timestamp="1722340000""#, r#"timestamp="abc""#);
    let doc = parse(&mutated);
    let result = root_attrs::check(doc.root_element());
    assert!(result.outcome.is_fail());
    let violation = result
        .violations
        .iter()
        .find(|v| v.location == "coverage/@timestamp")
        .expect("timestamp violation");
    assert!(violation.message.contains("integer"));
    assert_eq!(violation.actual.as_deref(), Some("abc"));
}

#[test]
fn count_attributes_reject_sign_and_point() {
    for bad in ["-5", "59.0", ""] {
        let mutated = VALID_XML.replace(r#"lines-valid="59""#, &format!(r#"lines-valid="{bad}""#));
        let doc = parse(&mutated);
        let result = root_attrs::check(doc.root_element());
        assert!(
            result
                .violations
                .iter()
                .any(|v| v.location == "coverage/@lines-valid"),
            "lines-valid={bad:?} should fail the count check"
        );
    }
}

#[test]
fn count_predicate_accepts_digit_strings_only() {
    assert!(root_attrs::is_count("0"));
    assert!(root_attrs::is_count("0123456789"));
    assert!(!root_attrs::is_count(""));
    assert!(!root_attrs::is_count("-1"));
    assert!(!root_attrs::is_count("1.0"));
    assert!(!root_attrs::is_count("1e3"));
}

#[test]
fn rate_rejects_scientific_notation() {
    let mutated = VALID_XML.replace(
        r#"line-rate="0.847458" branch-rate="0.000000" lines-covered"#,
        r#"line-rate="8.474576e-01" branch-rate="0.000000" lines-covered"#,
    );
    let doc = parse(&mutated);
    let result = root_attrs::check(doc.root_element());
    let violation = result
        .violations
        .iter()
        .find(|v| v.location == "coverage/@line-rate")
        .expect("line-rate violation");
    assert!(violation.message.contains("scientific notation"));
}

#[test]
fn rate_requires_exactly_six_fraction_digits() {
    assert!(root_attrs::is_fixed_rate("0.847458"));
    assert!(root_attrs::is_fixed_rate("1.000000"));
    assert!(!root_attrs::is_fixed_rate("0.8475"));
    assert!(!root_attrs::is_fixed_rate("0.8474576"));
    assert!(!root_attrs::is_fixed_rate(".847458"));
    assert!(!root_attrs::is_fixed_rate("0,847458"));
    assert!(!root_attrs::is_fixed_rate("8.474576E-01"));
}

#[test]
fn version_with_legacy_marker_fails_even_alongside_required_marker() {
    let mutated = VALID_XML.replace(
        r#"version="xcresultparser 1.8.1""#,
        r#"version="xcresultparser 1.0 (diff_coverage)""#,
    );
    let doc = parse(&mutated);
    let result = root_attrs::check(doc.root_element());
    assert!(result.outcome.is_fail());
    let violation = result
        .violations
        .iter()
        .find(|v| v.location == "coverage/@version")
        .expect("version violation");
    assert!(violation.message.contains("diff_coverage"));
}

#[test]
fn version_without_required_marker_fails() {
    let mutated = VALID_XML.replace(
        r#"version="xcresultparser 1.8.1""#,
        r#"version="1.0""#,
    );
    let doc = parse(&mutated);
    let result = root_attrs::check(doc.root_element());
    assert!(result.outcome.is_fail());
    assert!(result
        .violations
        .iter()
        .any(|v| v.location == "coverage/@version" && v.message.contains("xcresultparser")));
}

// ============== Structure Tests ==============

#[test]
fn valid_document_passes_structure() {
    let doc = parse(VALID_XML);
    let result = structure::check(doc.root_element());
    assert!(
        result.outcome.is_pass(),
        "expected pass, got {:?}",
        result.violations
    );
}

#[test]
fn wrong_root_tag_fails() {
    let mutated = VALID_XML
        .replace("<coverage ", "<report ")
        .replace("</coverage>", "</report>");
    let doc = parse(&mutated);
    let result = structure::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.contains("root element should be 'coverage'")));
}

#[test]
fn empty_sources_fails() {
    let mutated = VALID_XML.replace("<source>/workspace/myproject</source>", "");
    let doc = parse(&mutated);
    let result = structure::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.contains("no 'source' elements")));
}

#[test]
fn missing_sources_fails() {
    let body = r#"<packages><package name="p" line-rate="0.000000" branch-rate="0.000000" complexity="0"><classes><class name="c" filename="c.swift" line-rate="0.000000" branch-rate="0.000000" complexity="0"><methods/><lines><line number="1" hits="0"/></lines></class></classes></package></packages>"#;
    let doc_text = minimal_root(body);
    let doc = parse(&doc_text);
    let result = structure::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.contains("missing 'sources'")));
}

#[test]
fn missing_packages_fails() {
    let doc_text = minimal_root("<sources><source>.</source></sources>");
    let doc = parse(&doc_text);
    let result = structure::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.contains("missing 'packages'")));
}

#[test]
fn empty_packages_fails() {
    let doc_text = minimal_root("<sources><source>.</source></sources><packages></packages>");
    let doc = parse(&doc_text);
    let result = structure::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.contains("no 'package' elements")));
}

#[test]
fn package_without_classes_fails() {
    let body = r#"<sources><source>.</source></sources><packages><package name="p" line-rate="0.000000" branch-rate="0.000000" complexity="0"/></packages>"#;
    let doc_text = minimal_root(body);
    let doc = parse(&doc_text);
    let result = structure::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.contains("missing 'classes'")));
}

#[test]
fn class_without_lines_entries_fails() {
    let mutated = VALID_XML
        .replace(r#"<line number="10" hits="4"/>"#, "")
        .replace(r#"<line number="11" hits="0"/>"#, "");
    let doc = parse(&mutated);
    let result = structure::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.contains("no 'line' elements")));
}

#[test]
fn only_first_three_classes_are_deep_checked() {
    let good_class = r#"<class name="c" filename="c.swift" line-rate="0.000000" branch-rate="0.000000" complexity="0"><methods/><lines><line number="1" hits="0"/></lines></class>"#;
    // Fourth class is structurally broken but past the sampling window.
    let broken_class = r#"<class name="broken" filename="b.swift" line-rate="0.000000" branch-rate="0.000000" complexity="0"/>"#;
    let body = format!(
        r#"<sources><source>.</source></sources><packages><package name="p" line-rate="0.000000" branch-rate="0.000000" complexity="0"><classes>{good_class}{good_class}{good_class}{broken_class}</classes></package></packages>"#
    );
    let doc_text = minimal_root(&body);
    let doc = parse(&doc_text);
    let result = structure::check(doc.root_element());
    assert!(
        result.outcome.is_pass(),
        "class beyond the sample should not be inspected: {:?}",
        result.violations
    );
}

// ============== Branch Invariant Tests ==============

#[test]
fn valid_document_passes_invariants() {
    let doc = parse(VALID_XML);
    let result = invariants::check(doc.root_element());
    assert!(
        result.outcome.is_pass(),
        "expected pass, got {:?}",
        result.violations
    );
}

#[test]
fn nonzero_branches_covered_fails() {
    let mutated = VALID_XML.replace(r#"branches-covered="0""#, r#"branches-covered="3""#);
    let doc = parse(&mutated);
    let result = invariants::check(doc.root_element());
    let violation = result
        .violations
        .iter()
        .find(|v| v.location == "coverage/@branches-covered")
        .expect("branches-covered violation");
    assert_eq!(violation.expected.as_deref(), Some("0"));
    assert_eq!(violation.actual.as_deref(), Some("3"));
}

#[test]
fn nonzero_root_branch_rate_fails() {
    let mutated = VALID_XML.replace(
        r#"line-rate="0.847458" branch-rate="0.000000""#,
        r#"line-rate="0.847458" branch-rate="0.500000""#,
    );
    let doc = parse(&mutated);
    let result = invariants::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.location == "coverage/@branch-rate"));
}

#[test]
fn nonzero_class_branch_rate_is_reported_for_that_class() {
    let mutated = VALID_XML.replace(
        r#"line-rate="0.900000" branch-rate="0.000000""#,
        r#"line-rate="0.900000" branch-rate="0.500000""#,
    );
    let doc = parse(&mutated);
    let result = invariants::check(doc.root_element());
    assert!(result.outcome.is_fail());
    let violation = result
        .violations
        .iter()
        .find(|v| v.location.starts_with("class["))
        .expect("class-level violation");
    assert!(violation.location.contains("ContentView"));
    assert_eq!(violation.actual.as_deref(), Some("0.500000"));
}

#[test]
fn nonzero_package_branch_rate_fails() {
    let mutated = VALID_XML.replace(
        r#"line-rate="0.800000" branch-rate="0.000000""#,
        r#"line-rate="0.800000" branch-rate="0.250000""#,
    );
    let doc = parse(&mutated);
    let result = invariants::check(doc.root_element());
    assert!(result
        .violations
        .iter()
        .any(|v| v.location.starts_with("package[") && v.location.contains("MyApp")));
}

// ============== Path Hygiene Tests ==============

#[test]
fn relative_paths_produce_no_warnings() {
    let doc = parse(VALID_XML);
    let result = paths::check(doc.root_element());
    assert!(result.outcome.is_pass());
    assert!(result.violations.is_empty());
}

#[test]
fn development_machine_path_is_flagged_as_warning_only() {
    let mutated = VALID_XML.replace(
        r#"filename="Sources/ContentView.swift""#,
        r#"filename="/Users/dev/Development/App/ContentView.swift""#,
    );
    let doc = parse(&mutated);
    let result = paths::check(doc.root_element());
    assert!(
        result.outcome.is_pass(),
        "hygiene findings must not fail the check"
    );
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::Warning);
    assert!(result.violations[0].message.contains("/Users/dev/Development/"));
}

#[test]
fn home_project_path_is_flagged() {
    let mutated = VALID_XML.replace(
        r#"filename="Sources/ContentView.swift""#,
        r#"filename="/home/ci/project/src/ContentView.swift""#,
    );
    let doc = parse(&mutated);
    let result = paths::check(doc.root_element());
    assert_eq!(result.violations.len(), 1);
}

#[test]
fn at_most_three_offending_paths_are_listed() {
    let class = |i: usize| {
        format!(
            r#"<class name="c{i}" filename="/home/ci/project/c{i}.swift" line-rate="0.000000" branch-rate="0.000000" complexity="0"><methods/><lines><line number="1" hits="0"/></lines></class>"#
        )
    };
    let classes: String = (0..5).map(class).collect();
    let body = format!(
        r#"<sources><source>.</source></sources><packages><package name="p" line-rate="0.000000" branch-rate="0.000000" complexity="0"><classes>{classes}</classes></package></packages>"#
    );
    let doc_text = minimal_root(&body);
    let doc = parse(&doc_text);
    let result = paths::check(doc.root_element());
    assert_eq!(result.violations.len(), 3, "report is capped at 3 paths");
}

// ============== Outcome Semantics ==============

#[test]
fn skipped_outcome_is_distinct_from_pass() {
    let skipped = CheckOutcome::Skipped("tool missing".to_string());
    assert!(!skipped.is_pass());
    assert!(!skipped.is_fail());
    assert!(skipped.is_skipped());
}
