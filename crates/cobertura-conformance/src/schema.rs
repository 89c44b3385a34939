//! DTD compliance check
//!
//! Delegates grammar validation to an external `xmllint` process. The
//! document under test usually references the Cobertura DTD by remote URL;
//! the reference is rewritten to a local copy so validation works offline.

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::process::CommandRunner;
use crate::result::{CheckResult, Violation};

pub const CHECK_NAME: &str = "dtd-compliance";

/// The coverage-04 DTD documents are validated against.
pub const COVERAGE_DTD: &str = include_str!("coverage-04.dtd");

static DOCTYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!DOCTYPE\s+coverage\s+SYSTEM\s+"[^"]+""#).expect("doctype pattern")
});

/// Validate `content` against the embedded DTD using `xmllint`.
///
/// Returns `Skipped` when `xmllint` is not installed or when the document
/// carries its own inline DTD (an external grammar would conflict with it).
pub fn check_schema(content: &str, runner: &dyn CommandRunner) -> Result<CheckResult> {
    if !runner.available("xmllint") {
        return Ok(CheckResult::skipped(
            CHECK_NAME,
            "xmllint not found on PATH; DTD validation skipped",
        ));
    }

    if content.contains("<!ELEMENT") && content.contains("<!ATTLIST") {
        return Ok(CheckResult::skipped(
            CHECK_NAME,
            "document carries an inline DTD; external validation skipped",
        ));
    }

    // Materialize the DTD next to a scratch copy of the document whose
    // DOCTYPE points at it.
    let mut dtd_file = NamedTempFile::with_suffix(".dtd")?;
    dtd_file.write_all(COVERAGE_DTD.as_bytes())?;
    let dtd_ref = format!("file://{}", dtd_file.path().display());

    let candidate = with_local_doctype(content, &dtd_ref);
    let mut xml_file = NamedTempFile::with_suffix(".xml")?;
    xml_file.write_all(candidate.as_bytes())?;

    let args = vec![
        "--valid".to_string(),
        "--noout".to_string(),
        xml_file.path().display().to_string(),
    ];
    let output = match runner.run("xmllint", &args) {
        Ok(out) => out,
        Err(e) => {
            return Ok(CheckResult::skipped(
                CHECK_NAME,
                format!("xmllint could not be launched: {e}"),
            ));
        }
    };

    let violations = if output.success() {
        Vec::new()
    } else {
        vec![Violation::error(
            "document",
            format!("DTD validation failed: {}", output.stderr.trim()),
        )]
    };

    Ok(CheckResult::from_violations(CHECK_NAME, violations))
}

/// Point the document's DOCTYPE at `dtd_ref`, injecting one if absent.
fn with_local_doctype(content: &str, dtd_ref: &str) -> String {
    let local = format!(r#"<!DOCTYPE coverage SYSTEM "{dtd_ref}""#);

    if DOCTYPE_RE.is_match(content) {
        return DOCTYPE_RE.replace(content, local.as_str()).into_owned();
    }
    if content.contains("<!DOCTYPE") {
        // DOCTYPE in an unexpected shape, leave the document alone.
        return content.to_string();
    }

    let doctype_line = format!("{local}>");
    if let Some(decl_end) = content.find("?>").filter(|_| content.starts_with("<?xml")) {
        let (decl, rest) = content.split_at(decl_end + 2);
        format!("{decl}\n{doctype_line}{rest}")
    } else {
        format!("{doctype_line}\n{content}")
    }
}

#[cfg(test)]
mod tests {
    use super::with_local_doctype;

    #[test]
    fn rewrites_remote_system_identifier() {
        let doc = r#"<?xml version="1.0"?>
<!DOCTYPE coverage SYSTEM "http://cobertura.sourceforge.net/xml/coverage-04.dtd">
<coverage/>"#;
        let out = with_local_doctype(doc, "file:///tmp/coverage-04.dtd");
        assert!(out.contains(r#"SYSTEM "file:///tmp/coverage-04.dtd""#));
        assert!(!out.contains("sourceforge"));
    }

    #[test]
    fn injects_doctype_after_xml_declaration() {
        let doc = "<?xml version=\"1.0\"?>\n<coverage/>";
        let out = with_local_doctype(doc, "file:///tmp/coverage-04.dtd");
        let decl_pos = out.find("<?xml").unwrap();
        let doctype_pos = out.find("<!DOCTYPE coverage").unwrap();
        let root_pos = out.find("<coverage").unwrap();
        assert!(decl_pos < doctype_pos && doctype_pos < root_pos);
    }

    #[test]
    fn prepends_doctype_without_xml_declaration() {
        let out = with_local_doctype("<coverage/>", "file:///tmp/coverage-04.dtd");
        assert!(out.starts_with("<!DOCTYPE coverage"));
    }
}
