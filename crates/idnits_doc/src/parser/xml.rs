//! xml2rfc parser.
//!
//! A well-formed document is read from the element tree. When the tree
//! cannot be built, the syntax error becomes a diagnostic and metadata is
//! recovered line by line from the raw source instead.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Node, ParsingOptions};
use tracing::{debug, warn};

use super::dates::date_from_parts;
use super::located;
use crate::error::{DocError, DocResult};
use crate::models::{
    Author, Citation, DocType, Document, Format, Metadata, ParseDiagnostic, Reference, Section,
};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title[^>]*>([^<]+)</title>").expect("valid regex"));
static RFC_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<rfc\b").expect("valid regex"));
static DOCNAME_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdocName\s*=\s*["']([^"']+)["']"#).expect("valid regex"));
static NUMBER_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bnumber\s*=\s*["'](\d+)["']"#).expect("valid regex"));
static VERSION_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bversion\s*=\s*["']([^"']+)["']"#).expect("valid regex"));
static AUTHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<author\b[^>]*\bfullname\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<reference\b[^>]*\banchor\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});
static XREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<xref\b[^>]*\btarget\s*=\s*["']([^"']+)["']"#).expect("valid regex")
});

pub(crate) fn parse_xml(path: PathBuf, content: &str, lines: Vec<String>) -> DocResult<Document> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    match roxmltree::Document::parse_with_options(content, options) {
        Ok(tree) => from_tree(path, &tree, lines),
        Err(e) => {
            let pos = e.pos();
            warn!("XML syntax error in {:?} at {}:{}: {}", path, pos.row, pos.col, e);
            let diag = located(pos.row as usize, lines.len(), e.to_string());
            Ok(recover(path, lines, diag))
        }
    }
}

fn line_of(tree: &roxmltree::Document<'_>, node: Node<'_, '_>) -> usize {
    tree.text_pos_at(node.range().start).row as usize
}

fn text_of(node: Node<'_, '_>) -> String {
    let raw: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(name))
}

/// Title of a section or references block: a `<name>` child (v3) or a
/// `title` attribute (v2).
fn heading_of(node: Node<'_, '_>) -> Option<String> {
    child(node, "name")
        .map(text_of)
        .or_else(|| node.attribute("title").map(str::to_string))
        .filter(|t| !t.is_empty())
}

fn from_tree(
    path: PathBuf,
    tree: &roxmltree::Document<'_>,
    lines: Vec<String>,
) -> DocResult<Document> {
    let root = tree.root_element();
    if !root.has_tag_name("rfc") {
        return Err(DocError::UnsupportedXmlRoot(root.tag_name().name().to_string()));
    }

    let line_count = lines.len();
    let mut err = Vec::new();
    let mut meta = Metadata {
        docname: root.attribute("docName").map(str::to_string),
        docname_line: root.attribute("docName").map(|_| line_of(tree, root)),
        category: root.attribute("category").map(str::to_string),
        ipr: root.attribute("ipr").map(str::to_string),
        xml_version: root.attribute("version").map(str::to_string),
        ..Metadata::default()
    };

    if let Some(number) = root.attribute("number") {
        match number.trim().parse() {
            Ok(n) => meta.rfc_number = Some(n),
            Err(_) => err.push(located(
                line_of(tree, root),
                line_count,
                format!("Could not parse the RFC number '{}'", number),
            )),
        }
    }

    match child(root, "front") {
        Some(front) => read_front(tree, front, &mut meta, &mut err, line_count),
        None => err.push(located(line_of(tree, root), line_count, "Missing <front> element")),
    }

    let mut sections = Vec::new();
    if let Some(middle) = child(root, "middle") {
        number_sections(tree, middle, "", &mut sections);
    }
    if let Some(back) = child(root, "back") {
        for node in back.descendants().filter(|n| n.has_tag_name("section")) {
            if let Some(title) = heading_of(node) {
                sections.push(Section {
                    number: None,
                    title,
                    line: line_of(tree, node),
                });
            }
        }
    }

    let references: Vec<Reference> = root
        .descendants()
        .filter(|n| n.has_tag_name("reference"))
        .filter_map(|node| {
            let anchor = node.attribute("anchor")?;
            let normative = node
                .ancestors()
                .filter(|a| a.has_tag_name("references"))
                .filter_map(heading_of)
                .any(|t| t.to_lowercase().contains("normative"));
            Some(Reference {
                anchor: anchor.to_string(),
                target: node.attribute("target").map(str::to_string),
                normative,
                line: line_of(tree, node),
            })
        })
        .collect();

    // xrefs to sections, figures and other local anchors are not citations.
    let local_anchors: HashSet<&str> = root
        .descendants()
        .filter(|n| n.is_element() && !n.has_tag_name("reference"))
        .filter_map(|n| n.attribute("anchor"))
        .collect();
    let citations = root
        .descendants()
        .filter(|n| n.has_tag_name("xref") || n.has_tag_name("relref"))
        .filter_map(|n| n.attribute("target").map(|t| (n, t)))
        .filter(|(_, target)| !local_anchors.contains(target))
        .map(|(n, target)| Citation {
            anchor: target.to_string(),
            line: line_of(tree, n),
        })
        .collect();

    let doc_type = if meta.rfc_number.is_some() {
        DocType::Rfc
    } else {
        DocType::Draft
    };
    debug!("XML parse found {} sections, {} references", sections.len(), references.len());

    Ok(Document {
        path,
        format: Format::Xml,
        doc_type,
        lines,
        meta,
        sections,
        references,
        citations,
        err,
    })
}

fn read_front(
    tree: &roxmltree::Document<'_>,
    front: Node<'_, '_>,
    meta: &mut Metadata,
    err: &mut Vec<ParseDiagnostic>,
    line_count: usize,
) {
    meta.title = child(front, "title").map(text_of).filter(|t| !t.is_empty());
    meta.has_abstract = child(front, "abstract").is_some();

    for node in front.children().filter(|c| c.has_tag_name("author")) {
        let name = node
            .attribute("fullname")
            .map(str::to_string)
            .or_else(|| {
                let surname = node.attribute("surname")?;
                Some(match node.attribute("initials") {
                    Some(initials) => format!("{} {}", initials, surname),
                    None => surname.to_string(),
                })
            })
            .unwrap_or_default();
        let organization = child(node, "organization")
            .map(text_of)
            .filter(|o| !o.is_empty());
        meta.authors.push(Author {
            name,
            organization,
            line: Some(line_of(tree, node)),
        });
    }

    if let Some(date) = child(front, "date") {
        let line = line_of(tree, date);
        meta.date_line = Some(line);
        if let Some(year) = date.attribute("year") {
            meta.date = date_from_parts(year, date.attribute("month"), date.attribute("day"));
            if meta.date.is_none() {
                err.push(located(line, line_count, "Could not parse the <date> element"));
            }
        }
    }
}

/// Number `<section>` children of `parent` the way xml2rfc renders them.
fn number_sections(
    tree: &roxmltree::Document<'_>,
    parent: Node<'_, '_>,
    prefix: &str,
    out: &mut Vec<Section>,
) {
    let mut counter = 0;
    for node in parent.children().filter(|c| c.has_tag_name("section")) {
        let numbered = node.attribute("numbered") != Some("false");
        let number = if numbered {
            counter += 1;
            Some(format!("{}{}", prefix, counter))
        } else {
            None
        };
        out.push(Section {
            number: number.clone(),
            title: heading_of(node).unwrap_or_default(),
            line: line_of(tree, node),
        });
        if let Some(number) = number {
            number_sections(tree, node, &format!("{}.", number), out);
        }
    }
}

/// Best-effort metadata for a document whose tree could not be built.
fn recover(path: PathBuf, lines: Vec<String>, diag: ParseDiagnostic) -> Document {
    let mut meta = Metadata::default();
    let mut references = Vec::new();
    let mut citations = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        if RFC_TAG_RE.is_match(line) {
            if let Some(caps) = DOCNAME_ATTR_RE.captures(line) {
                meta.docname = Some(caps[1].to_string());
                meta.docname_line = Some(line_no);
            }
            if let Some(caps) = NUMBER_ATTR_RE.captures(line) {
                meta.rfc_number = caps[1].parse().ok();
            }
            if let Some(caps) = VERSION_ATTR_RE.captures(line) {
                meta.xml_version = Some(caps[1].to_string());
            }
        }
        if meta.title.is_none() {
            if let Some(caps) = TITLE_RE.captures(line) {
                meta.title = Some(caps[1].trim().to_string());
            }
        }
        if line.contains("<abstract") {
            meta.has_abstract = true;
        }
        if let Some(caps) = AUTHOR_RE.captures(line) {
            meta.authors.push(Author {
                name: caps[1].to_string(),
                organization: None,
                line: Some(line_no),
            });
        }
        for caps in REFERENCE_RE.captures_iter(line) {
            references.push(Reference {
                anchor: caps[1].to_string(),
                target: None,
                normative: false,
                line: line_no,
            });
        }
        for caps in XREF_RE.captures_iter(line) {
            citations.push(Citation {
                anchor: caps[1].to_string(),
                line: line_no,
            });
        }
    }

    let doc_type = if meta.rfc_number.is_some() {
        DocType::Rfc
    } else {
        DocType::Draft
    };

    Document {
        path,
        format: Format::Xml,
        doc_type,
        lines,
        meta,
        sections: Vec::new(),
        references,
        citations,
        err: vec![diag],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(content: &str) -> DocResult<Document> {
        let lines = content.lines().map(str::to_string).collect();
        parse_xml(PathBuf::from("test.xml"), content, lines)
    }

    const DRAFT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rfc docName="draft-smith-sample-00" category="info" ipr="trust200902" version="3">
  <front>
    <title>A Sample Protocol</title>
    <author fullname="Jane Smith" initials="J." surname="Smith">
      <organization>Example Inc</organization>
    </author>
    <date year="2024" month="March" day="2"/>
    <abstract><t>Sample.</t></abstract>
  </front>
  <middle>
    <section anchor="intro">
      <name>Introduction</name>
      <t>See <xref target="RFC2119"/> and <xref target="terms"/>.</t>
      <section anchor="terms"><name>Terminology</name></section>
    </section>
    <section numbered="false"><name>Acknowledgements</name></section>
    <section><name>Security Considerations</name></section>
  </middle>
  <back>
    <references>
      <name>Normative References</name>
      <reference anchor="RFC2119" target="https://www.rfc-editor.org/info/rfc2119">
        <front><title>Key words</title></front>
      </reference>
    </references>
  </back>
</rfc>
"#;

    #[test]
    fn test_well_formed_draft() {
        let d = parse(DRAFT).unwrap();
        assert!(d.err.is_empty());
        assert_eq!(d.format, Format::Xml);
        assert_eq!(d.doc_type, DocType::Draft);
        assert_eq!(d.meta.title.as_deref(), Some("A Sample Protocol"));
        assert_eq!(d.meta.docname.as_deref(), Some("draft-smith-sample-00"));
        assert_eq!(d.meta.docname_line, Some(2));
        assert_eq!(d.meta.xml_version.as_deref(), Some("3"));
        assert_eq!(d.meta.date, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(d.meta.authors[0].name, "Jane Smith");
        assert_eq!(d.meta.authors[0].organization.as_deref(), Some("Example Inc"));
        assert!(d.meta.has_abstract);
    }

    #[test]
    fn test_section_numbering() {
        let d = parse(DRAFT).unwrap();
        let numbered: Vec<_> = d
            .sections
            .iter()
            .map(|s| (s.number.as_deref(), s.title.as_str()))
            .collect();
        assert_eq!(
            numbered,
            vec![
                (Some("1"), "Introduction"),
                (Some("1.1"), "Terminology"),
                (None, "Acknowledgements"),
                (Some("2"), "Security Considerations"),
            ]
        );
    }

    #[test]
    fn test_references_and_citations() {
        let d = parse(DRAFT).unwrap();
        assert_eq!(d.references.len(), 1);
        assert!(d.references[0].normative);
        assert_eq!(d.references[0].line, 23);
        let cited: Vec<_> = d.citations.iter().map(|c| c.anchor.as_str()).collect();
        assert_eq!(cited, vec!["RFC2119"]);
    }

    #[test]
    fn test_rfc_number() {
        let d = parse("<rfc number=\"9999\"><front><title>T</title></front></rfc>").unwrap();
        assert_eq!(d.doc_type, DocType::Rfc);
        assert_eq!(d.meta.rfc_number, Some(9999));
    }

    #[test]
    fn test_wrong_root_is_fatal() {
        let err = parse("<?xml version=\"1.0\"?>\n<html><body/></html>").unwrap_err();
        assert!(matches!(err, DocError::UnsupportedXmlRoot(ref name) if name == "html"));
    }

    #[test]
    fn test_syntax_error_recovers_metadata() {
        let content = "<?xml version=\"1.0\"?>\n\
            <rfc docName=\"draft-x-y-00\">\n  <front>\n    <title>Broken</title>\n\
            \x20   <abstract><t>Oops</abstract>\n  </front>\n</rfc>\n";
        let d = parse(content).unwrap();
        assert_eq!(d.err.len(), 1);
        assert_eq!(d.err[0].line, Some(5));
        assert_eq!(d.meta.title.as_deref(), Some("Broken"));
        assert_eq!(d.meta.docname.as_deref(), Some("draft-x-y-00"));
        assert!(d.meta.has_abstract);
        assert!(d.sections.is_empty());
    }

    #[test]
    fn test_missing_front_is_diagnostic() {
        let d = parse("<rfc docName=\"draft-a-b-00\">\n<middle/>\n</rfc>").unwrap();
        assert_eq!(d.err.len(), 1);
        assert_eq!(d.err[0].line, Some(1));
        assert!(d.meta.title.is_none());
    }
}
