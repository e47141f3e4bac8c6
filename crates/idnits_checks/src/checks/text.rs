//! Checks on the raw text of plain-text documents.

use std::sync::LazyLock;

use idnits_doc::{Document, RunOptions};
use regex::Regex;

use super::collect;
use crate::error::CheckResult;
use crate::nit::{count_of, Finding, Nit};

const MAX_LINE_LENGTH: usize = 72;
const LENIENT_LINE_LENGTH: usize = 80;
const MAX_PAGE_LENGTH: usize = 58;
const FORM_FEED: char = '\x0c';

const BOILERPLATE_SECTIONS: &[&str] = &["Status of This Memo", "Copyright Notice"];

static FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Page \d+\]\s*$").expect("valid regex"));

pub(super) fn check_boilerplate(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    let nits = BOILERPLATE_SECTIONS
        .iter()
        .filter(|title| doc.find_section(title).is_none())
        .map(|title| Nit::unlocated(format!("Missing '{}' section", title)))
        .collect();

    Ok(collect(nits, |n| {
        format!(
            "The document is missing {}",
            count_of(n, "required boilerplate section")
        )
    }))
}

pub(super) fn check_line_length(doc: &Document, options: &RunOptions) -> CheckResult<Vec<Finding>> {
    let limit = if options.mode.is_lenient() {
        LENIENT_LINE_LENGTH
    } else {
        MAX_LINE_LENGTH
    };

    let nits = doc
        .numbered_lines()
        .filter_map(|(num, line)| {
            let width = line.trim_end_matches([FORM_FEED, '\r']).chars().count();
            (width > limit).then(|| Nit::at(num, format!("Line is {} characters long", width)))
        })
        .collect();

    Ok(collect(nits, |n| {
        format!("Found {} longer than {} characters", count_of(n, "line"), limit)
    }))
}

pub(super) fn check_page_length(doc: &Document, options: &RunOptions) -> CheckResult<Vec<Finding>> {
    if options.mode.is_lenient() {
        return Ok(Vec::new());
    }

    let nits = pages(doc)
        .into_iter()
        .enumerate()
        .filter(|(_, page)| page.length > MAX_PAGE_LENGTH)
        .map(|(i, page)| {
            Nit::at(
                page.start,
                format!("Page {} is {} lines long", i + 1, page.length),
            )
        })
        .collect();

    Ok(collect(nits, |n| {
        format!(
            "Found {} longer than {} lines",
            count_of(n, "page"),
            MAX_PAGE_LENGTH
        )
    }))
}

pub(super) fn check_pagination(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    let nits = doc
        .numbered_lines()
        .filter_map(|(num, line)| {
            if line.contains(FORM_FEED) {
                Some(Nit::at(num, "Form feed in submission text"))
            } else if FOOTER_RE.is_match(line) {
                Some(Nit::at(num, "Page footer in submission text"))
            } else {
                None
            }
        })
        .collect();

    Ok(collect(nits, |n| {
        format!(
            "Found {} in a submission document",
            count_of(n, "pagination artifact")
        )
    }))
}

pub(super) fn check_characters(doc: &Document, options: &RunOptions) -> CheckResult<Vec<Finding>> {
    let lenient = options.mode.is_lenient();

    let nits = doc
        .numbered_lines()
        .filter_map(|(num, line)| {
            line.chars().find_map(|c| match c {
                FORM_FEED | '\r' => None,
                '\t' => Some(Nit::at(num, "Line contains a tab character")),
                c if c.is_control() => Some(Nit::at(
                    num,
                    format!("Line contains control character U+{:04X}", c as u32),
                )),
                c if !c.is_ascii() && !lenient => Some(Nit::at(
                    num,
                    format!("Line contains non-ASCII character U+{:04X}", c as u32),
                )),
                _ => None,
            })
        })
        .collect();

    Ok(collect(nits, |n| {
        format!(
            "Found {} with control or non-ASCII characters",
            count_of(n, "line")
        )
    }))
}

#[derive(Debug, PartialEq, Eq)]
struct Page {
    /// First line of the page
    start: usize,
    length: usize,
}

/// Split the document into form-feed separated pages.
///
/// A line holding only a form feed belongs to neither page.
fn pages(doc: &Document) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page {
        start: 1,
        length: 0,
    };

    for (num, line) in doc.numbered_lines() {
        if line.contains(FORM_FEED) {
            pages.push(current);
            let rest = line.trim_matches(|c: char| c == FORM_FEED || c.is_whitespace());
            current = if rest.is_empty() {
                Page {
                    start: (num + 1).min(doc.line_count()),
                    length: 0,
                }
            } else {
                Page {
                    start: num,
                    length: 1,
                }
            };
        } else {
            current.length += 1;
        }
    }
    pages.push(current);
    pages.retain(|p| p.length > 0);
    pages
}
