//! xml2rfc vocabulary checks.

use idnits_doc::{Document, RunOptions};

use crate::error::CheckResult;
use crate::nit::{Finding, Nit};

pub(super) fn check_xml_version(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    let nit = match doc.meta.xml_version.as_deref().map(str::trim) {
        Some("3") => return Ok(Vec::new()),
        Some(other) => Nit::unlocated(format!(
            "The <rfc> element declares version=\"{}\" instead of \"3\"",
            other
        )),
        None => Nit::unlocated("The <rfc> element has no version attribute"),
    };

    Ok(vec![Finding::single(
        nit,
        "The source is not marked as using the v3 vocabulary",
    )])
}

#[cfg(test)]
mod tests {
    use idnits_doc::{DocType, Format};

    use super::*;
    use crate::checks::test_support::document;

    #[test]
    fn test_xml_version() {
        let mut doc = document(Format::Xml, DocType::Draft, &["<rfc/>"]);
        let opts = RunOptions::default();

        assert_eq!(check_xml_version(&doc, &opts).unwrap().len(), 1);

        doc.meta.xml_version = Some("2".into());
        let findings = check_xml_version(&doc, &opts).unwrap();
        assert!(findings[0].nits[0].msg.contains("version=\"2\""));

        doc.meta.xml_version = Some("3".into());
        assert!(check_xml_version(&doc, &opts).unwrap().is_empty());
    }
}
