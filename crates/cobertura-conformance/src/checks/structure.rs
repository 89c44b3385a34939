//! Structural nesting rules
//!
//! Verifies the `coverage > sources/packages > package > classes > class >
//! methods/lines` shape. Deep checks cover only the first few classes of
//! each package; sibling classes share the same generated shape.

use roxmltree::Node;

use crate::result::{CheckResult, Violation};

pub const CHECK_NAME: &str = "structure";

/// How many classes per package get attribute/child inspection.
const CLASS_SAMPLE: usize = 3;

const PACKAGE_ATTRS: [&str; 4] = ["name", "line-rate", "branch-rate", "complexity"];
const CLASS_ATTRS: [&str; 5] = ["name", "filename", "line-rate", "branch-rate", "complexity"];

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |c| c.has_tag_name(tag))
}

pub fn check(root: Node) -> CheckResult {
    let mut violations = Vec::new();

    if root.tag_name().name() != "coverage" {
        violations.push(
            Violation::error("/", "root element should be 'coverage'")
                .with_values("coverage", root.tag_name().name()),
        );
    }

    match child(root, "sources") {
        None => violations.push(Violation::error("coverage", "missing 'sources' element")),
        Some(sources) => {
            if children(sources, "source").next().is_none() {
                violations.push(Violation::error(
                    "coverage/sources",
                    "no 'source' elements found in 'sources'",
                ));
            }
        }
    }

    match child(root, "packages") {
        None => violations.push(Violation::error("coverage", "missing 'packages' element")),
        Some(packages) => {
            let package_list: Vec<_> = children(packages, "package").collect();
            if package_list.is_empty() {
                violations.push(Violation::error(
                    "coverage/packages",
                    "no 'package' elements found",
                ));
            }
            for (i, package) in package_list.iter().enumerate() {
                check_package(*package, i, &mut violations);
            }
        }
    }

    CheckResult::from_violations(CHECK_NAME, violations)
}

fn check_package(package: Node, index: usize, violations: &mut Vec<Violation>) {
    let loc = format!("package[{index}]");

    for attr in PACKAGE_ATTRS {
        if !package.has_attribute(attr) {
            violations.push(Violation::error(
                format!("{loc}/@{attr}"),
                format!("package {index}: missing attribute {attr}"),
            ));
        }
    }

    match child(package, "classes") {
        None => violations.push(Violation::error(
            loc.as_str(),
            format!("package {index}: missing 'classes' element"),
        )),
        Some(classes) => {
            let class_list: Vec<_> = children(classes, "class").collect();
            if class_list.is_empty() {
                violations.push(Violation::error(
                    loc.as_str(),
                    format!("package {index}: no 'class' elements found"),
                ));
            }
            for (j, class) in class_list.iter().take(CLASS_SAMPLE).enumerate() {
                check_class(*class, index, j, violations);
            }
        }
    }
}

fn check_class(class: Node, pkg_index: usize, cls_index: usize, violations: &mut Vec<Violation>) {
    let loc = format!("package[{pkg_index}]/class[{cls_index}]");

    for attr in CLASS_ATTRS {
        if !class.has_attribute(attr) {
            violations.push(Violation::error(
                format!("{loc}/@{attr}"),
                format!("package {pkg_index} class {cls_index}: missing attribute {attr}"),
            ));
        }
    }

    if child(class, "methods").is_none() {
        violations.push(Violation::error(
            loc.as_str(),
            format!("package {pkg_index} class {cls_index}: missing 'methods' element"),
        ));
    }

    match child(class, "lines") {
        None => violations.push(Violation::error(
            loc.as_str(),
            format!("package {pkg_index} class {cls_index}: missing 'lines' element"),
        )),
        Some(lines) => {
            if children(lines, "line").next().is_none() {
                violations.push(Violation::error(
                    loc.as_str(),
                    format!("package {pkg_index} class {cls_index}: no 'line' elements found"),
                ));
            }
        }
    }
}
