//! Data models for parsed documents.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input format of a document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// xml2rfc source
    Xml,
    /// Paginated plain text
    Txt,
    /// Pre-submission plain text, without pagination
    Ids,
}

impl Format {
    /// Short label used in rule listings.
    pub fn label(&self) -> &'static str {
        match self {
            Format::Xml => "XML",
            Format::Txt => "TXT",
            Format::Ids => "IDs",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Xml => "xml",
            Format::Txt => "txt",
            Format::Ids => "ids",
        })
    }
}

/// Kind of document being checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    /// A published RFC
    Rfc,
    /// An Internet-Draft
    #[serde(rename = "ids")]
    Draft,
}

impl DocType {
    /// Short label used in rule listings.
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Rfc => "RFC",
            DocType::Draft => "IDs",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocType::Rfc => "rfc",
            DocType::Draft => "ids",
        })
    }
}

/// A problem that kept the parser from building part of the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-indexed source line, when the problem has a location
    pub line: Option<usize>,
    pub message: String,
}

impl ParseDiagnostic {
    pub fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn unlocated(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }
}

/// A document author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub organization: Option<String>,
    /// Line where the author was found
    pub line: Option<usize>,
}

/// Structured metadata extracted from the document front matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    /// Draft name, e.g. `draft-ietf-foo-bar-03`
    pub docname: Option<String>,
    pub docname_line: Option<usize>,
    pub rfc_number: Option<u32>,
    pub authors: Vec<Author>,
    pub date: Option<NaiveDate>,
    pub date_line: Option<usize>,
    pub expires: Option<NaiveDate>,
    pub expires_line: Option<usize>,
    /// Expiry as written, kept when it is not a recognizable date
    pub expires_text: Option<String>,
    /// Intended status or category
    pub category: Option<String>,
    pub ipr: Option<String>,
    pub has_abstract: bool,
    /// Value of the `version` attribute on an XML `<rfc>` element
    pub xml_version: Option<String>,
}

/// A document section heading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    /// Section number such as `3.1`, or `None` for unnumbered sections
    pub number: Option<String>,
    pub title: String,
    pub line: usize,
}

/// An entry in a references section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    pub anchor: String,
    pub target: Option<String>,
    pub normative: bool,
    pub line: usize,
}

/// An in-text citation of a reference anchor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub anchor: String,
    pub line: usize,
}

/// Normalized, format-agnostic representation of one input document.
///
/// Built once by a parser and never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
    pub format: Format,
    pub doc_type: DocType,
    pub lines: Vec<String>,
    pub meta: Metadata,
    pub sections: Vec<Section>,
    pub references: Vec<Reference>,
    pub citations: Vec<Citation>,
    /// Parse diagnostics, in the order they were encountered
    pub err: Vec<ParseDiagnostic>,
}

impl Document {
    /// Get a source line by its 1-indexed number.
    pub fn line(&self, num: usize) -> Option<&str> {
        num.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// Number of source lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over `(line number, text)` pairs.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    /// Find a section by case-insensitive title prefix.
    pub fn find_section(&self, title: &str) -> Option<&Section> {
        let wanted = title.to_lowercase();
        self.sections
            .iter()
            .find(|s| s.title.to_lowercase().starts_with(&wanted))
    }

    /// Whether a reference with the given anchor exists.
    pub fn has_reference(&self, anchor: &str) -> bool {
        self.references
            .iter()
            .any(|r| r.anchor.eq_ignore_ascii_case(anchor))
    }

    /// Whether the given anchor is cited anywhere in the text.
    pub fn is_cited(&self, anchor: &str) -> bool {
        self.citations
            .iter()
            .any(|c| c.anchor.eq_ignore_ascii_case(anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            path: PathBuf::from("draft-test-00.txt"),
            format: Format::Txt,
            doc_type: DocType::Draft,
            lines: vec!["first".into(), "second".into()],
            meta: Metadata::default(),
            sections: vec![Section {
                number: Some("1".into()),
                title: "Introduction".into(),
                line: 2,
            }],
            references: vec![Reference {
                anchor: "RFC2119".into(),
                target: None,
                normative: true,
                line: 2,
            }],
            citations: Vec::new(),
            err: Vec::new(),
        }
    }

    #[test]
    fn test_line_lookup_is_one_indexed() {
        let doc = sample();
        assert_eq!(doc.line(0), None);
        assert_eq!(doc.line(1), Some("first"));
        assert_eq!(doc.line(2), Some("second"));
        assert_eq!(doc.line(3), None);
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_find_section_ignores_case() {
        let doc = sample();
        assert!(doc.find_section("introduction").is_some());
        assert!(doc.find_section("Security").is_none());
    }

    #[test]
    fn test_reference_lookup() {
        let doc = sample();
        assert!(doc.has_reference("rfc2119"));
        assert!(!doc.is_cited("RFC2119"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Format::Ids.label(), "IDs");
        assert_eq!(DocType::Rfc.label(), "RFC");
        assert_eq!(DocType::Draft.to_string(), "ids");
    }
}
