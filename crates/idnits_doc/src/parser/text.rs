//! Plain-text parser, shared by the paginated and submission formats.
//!
//! The first-page header is read as two columns: the left column carries
//! stream, status and expiry lines, the right column carries authors,
//! organizations and the document date. The body is walked once for section
//! headings, reference entries and citations, skipping running page headers
//! and footers.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::dates::parse_date;
use super::located;
use crate::models::{
    Author, Citation, DocType, Document, Format, Metadata, ParseDiagnostic, Reference, Section,
};

static FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Page \d+\]\s*$").expect("valid regex"));
static RUNNING_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:RFC \d+|Internet-Draft)\s{2,}\S.*\s{2,}\S").expect("valid regex")
});
static NUMBERED_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}(?:\.\d{1,2})*)\.?\s+([A-Z].*?)\s*$").expect("valid regex")
});
static APPENDIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Appendix\s+([A-Z](?:\.\d{1,2})*)\.?\s+(\S.*?)\s*$").expect("valid regex")
});
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{2,}\[([^\]\s]+)\]\s*(.*)$").expect("valid regex"));
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w\[])\[([A-Za-z0-9][A-Za-z0-9.\-/+_:]*)\]").expect("valid regex")
});
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(https?://[^>\s]+)>").expect("valid regex"));
static DOCNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(draft-[a-z0-9]+(?:-[a-z0-9]+)*-\d{2})\b").expect("valid regex")
});
static RFC_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Request for Comments:\s*(\d+)").expect("valid regex"));
static AUTHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z][a-z]?\.(?:-?[A-Z]\.)?\s?)+\s*[A-Z][\w'\-]+(?:, Ed\.)?$")
        .expect("valid regex")
});
static WILL_EXPIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"will expire on (.+?)\.?\s*$").expect("valid regex"));

/// Unnumbered headings recognized at column zero.
const UNNUMBERED_HEADINGS: &[&str] = &[
    "Abstract",
    "Status of This Memo",
    "Status of this Memo",
    "Copyright Notice",
    "Table of Contents",
    "Acknowledgements",
    "Acknowledgments",
    "Contributors",
    "References",
    "Normative References",
    "Informative References",
    "Authors' Addresses",
    "Author's Address",
    "Index",
];

/// How far into the document the draft name is searched for.
const DOCNAME_SEARCH_LINES: usize = 60;

pub(crate) fn parse_text(path: PathBuf, lines: Vec<String>, format: Format) -> Document {
    let mut parser = TextParser {
        lines: &lines,
        meta: Metadata::default(),
        sections: Vec::new(),
        references: Vec::new(),
        citations: Vec::new(),
        err: Vec::new(),
    };

    let body_start = parser.parse_front();
    parser.parse_body(body_start);

    let TextParser {
        meta,
        sections,
        references,
        citations,
        err,
        ..
    } = parser;

    let doc_type = if meta.rfc_number.is_some() {
        DocType::Rfc
    } else {
        DocType::Draft
    };
    debug!(
        "Text parse found {} sections, {} references, {} citations",
        sections.len(),
        references.len(),
        citations.len()
    );

    Document {
        path,
        format,
        doc_type,
        lines,
        meta,
        sections,
        references,
        citations,
        err,
    }
}

struct TextParser<'a> {
    lines: &'a [String],
    meta: Metadata,
    sections: Vec<Section>,
    references: Vec<Reference>,
    citations: Vec<Citation>,
    err: Vec<ParseDiagnostic>,
}

impl<'a> TextParser<'a> {
    fn diag(&mut self, line: usize, message: impl Into<String>) {
        let diag = located(line, self.lines.len(), message);
        self.err.push(diag);
    }

    fn is_blank(&self, idx: usize) -> bool {
        self.lines[idx].trim_matches(|c: char| c.is_whitespace() || c == '\x0c').is_empty()
    }

    fn next_non_blank(&self, from: usize) -> Option<usize> {
        (from..self.lines.len()).find(|&i| !self.is_blank(i))
    }

    /// Parse the header block and title block. Returns the index where the
    /// body starts.
    fn parse_front(&mut self) -> usize {
        let Some(start) = self.next_non_blank(0) else {
            return self.lines.len();
        };
        let end = (start..self.lines.len())
            .find(|&i| self.is_blank(i))
            .unwrap_or(self.lines.len());

        let has_columns = (start..end).any(|i| split_columns(&self.lines[i]).1.is_some());
        let title_search_from = if has_columns {
            self.parse_header(start, end);
            end
        } else {
            self.diag(start + 1, "Could not find the first-page header block");
            start
        };

        let body_start = self.parse_title(title_search_from);
        self.find_docname_fallback();
        body_start
    }

    fn parse_header(&mut self, start: usize, end: usize) {
        let lines = self.lines;
        let mut date: Option<(usize, String)> = None;

        for idx in start..end {
            let line_no = idx + 1;
            let (left, right) = split_columns(&lines[idx]);

            if let Some(left) = left {
                if let Some(caps) = RFC_NUMBER_RE.captures(left) {
                    self.meta.rfc_number = caps[1].parse().ok();
                } else if let Some(status) = left
                    .strip_prefix("Intended status:")
                    .or_else(|| left.strip_prefix("Category:"))
                {
                    self.meta.category = Some(status.trim().to_string());
                } else if let Some(expires) = left.strip_prefix("Expires:") {
                    self.meta.expires = parse_date(expires);
                    self.meta.expires_line = Some(line_no);
                    if self.meta.expires.is_none() {
                        self.meta.expires_text = Some(expires.trim().to_string());
                    }
                }
            }

            if let Some(right) = right {
                if parse_date(right).is_some() {
                    date = Some((line_no, right.to_string()));
                } else if AUTHOR_RE.is_match(right) {
                    self.meta.authors.push(Author {
                        name: right.to_string(),
                        organization: None,
                        line: Some(line_no),
                    });
                } else if let Some(author) = self.meta.authors.last_mut() {
                    if author.organization.is_none() {
                        author.organization = Some(right.to_string());
                    }
                }
            }
        }

        match date {
            Some((line_no, text)) => {
                self.meta.date = parse_date(&text);
                self.meta.date_line = Some(line_no);
            }
            None => self.diag(
                start + 1,
                "Could not find the document date in the first-page header",
            ),
        }
    }

    /// Read the centered title block that follows the header. A missing
    /// title leaves `meta.title` unset.
    fn parse_title(&mut self, from: usize) -> usize {
        let Some(first) = self.next_non_blank(from) else {
            return self.lines.len();
        };

        let lines = self.lines;
        let mut parts: Vec<&str> = Vec::new();
        let mut idx = first;
        while idx < lines.len() && !self.is_blank(idx) {
            let line = &lines[idx];
            if !line.starts_with(char::is_whitespace) {
                break;
            }
            let text = line.trim();
            if let Some(caps) = DOCNAME_RE.captures(text) {
                self.meta.docname = Some(caps[1].to_string());
                self.meta.docname_line = Some(idx + 1);
            } else {
                parts.push(text);
            }
            idx += 1;
        }

        if parts.is_empty() {
            debug!("No title block found at line {}", first + 1);
            first
        } else {
            self.meta.title = Some(parts.join(" "));
            trace!("Found title {:?}", self.meta.title);
            idx
        }
    }

    fn find_docname_fallback(&mut self) {
        if self.meta.docname.is_some() {
            return;
        }
        let limit = self.lines.len().min(DOCNAME_SEARCH_LINES);
        for idx in 0..limit {
            if let Some(caps) = DOCNAME_RE.captures(&self.lines[idx]) {
                self.meta.docname = Some(caps[1].to_string());
                self.meta.docname_line = Some(idx + 1);
                return;
            }
        }
    }

    fn parse_body(&mut self, start: usize) {
        let lines = self.lines;
        let mut in_references = false;
        let mut normative = false;

        for idx in start..lines.len() {
            let line_no = idx + 1;
            let line = lines[idx].trim_start_matches('\x0c');
            let furniture = FOOTER_RE.is_match(line) || RUNNING_HEADER_RE.is_match(line);
            if line.trim().is_empty() || furniture {
                continue;
            }

            if let Some(section) = heading(line, line_no) {
                let lower = section.title.to_lowercase();
                in_references = lower.contains("references");
                normative = lower.contains("normative");
                if lower.starts_with("abstract") {
                    self.meta.has_abstract = true;
                }
                self.sections.push(section);
                continue;
            }

            if self.meta.ipr.is_none() && line.contains("BCP 78 and BCP 79") {
                self.meta.ipr = Some("BCP 78/79".to_string());
            }
            if self.meta.expires.is_none() {
                if let Some(caps) = WILL_EXPIRE_RE.captures(line) {
                    if let Some(d) = parse_date(&caps[1]) {
                        self.meta.expires = Some(d);
                        self.meta.expires_line = Some(line_no);
                        self.meta.expires_text = None;
                    }
                }
            }

            if in_references {
                if let Some(caps) = REFERENCE_RE.captures(line) {
                    let target = self.reference_target(idx);
                    self.references.push(Reference {
                        anchor: caps[1].to_string(),
                        target,
                        normative,
                        line: line_no,
                    });
                }
                continue;
            }

            for caps in CITATION_RE.captures_iter(line) {
                self.citations.push(Citation {
                    anchor: caps[1].to_string(),
                    line: line_no,
                });
            }
        }
    }

    /// Find a URL in the reference entry starting at `idx`.
    fn reference_target(&self, idx: usize) -> Option<String> {
        (idx..self.lines.len())
            .take_while(|&i| {
                i == idx || !(self.is_blank(i) || REFERENCE_RE.is_match(&self.lines[i]))
            })
            .find_map(|i| URL_RE.captures(&self.lines[i]).map(|c| c[1].to_string()))
    }
}

/// Recognize a section heading at column zero.
fn heading(line: &str, line_no: usize) -> Option<Section> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let line = line.trim_end();

    if let Some(caps) = NUMBERED_SECTION_RE.captures(line) {
        return Some(Section {
            number: Some(caps[1].to_string()),
            title: caps[2].to_string(),
            line: line_no,
        });
    }
    if let Some(caps) = APPENDIX_RE.captures(line) {
        return Some(Section {
            number: Some(caps[1].to_string()),
            title: caps[2].to_string(),
            line: line_no,
        });
    }
    UNNUMBERED_HEADINGS
        .iter()
        .find(|h| line == **h)
        .map(|h| Section {
            number: None,
            title: h.to_string(),
            line: line_no,
        })
}

/// Split a header line into its left and right columns.
///
/// Columns are separated by a run of at least two spaces. A line that starts
/// with whitespace only has a right column.
fn split_columns(line: &str) -> (Option<&str>, Option<&str>) {
    let line = line.trim_end();
    if line.trim().is_empty() {
        return (None, None);
    }
    if line.starts_with(char::is_whitespace) {
        return (None, Some(line.trim_start()));
    }
    match line.find("  ") {
        Some(idx) => (Some(line[..idx].trim()), Some(line[idx..].trim())),
        None => (Some(line), None),
    }
}
