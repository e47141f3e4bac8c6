//! Front-matter checks: title, draft name, authors, abstract and dates.

use std::sync::LazyLock;

use idnits_doc::{Document, RunOptions};
use regex::Regex;

use super::collect;
use crate::error::CheckResult;
use crate::nit::{Finding, Nit};

/// Authors beyond this many draw a warning outside lenient mode.
const MAX_AUTHORS: usize = 5;

/// Longest allowed gap between the document date and its expiry.
const MAX_EXPIRY_DAYS: i64 = 185;

static DOCNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^draft-[a-z0-9]+(?:-[a-z0-9]+)+-\d{2}$").expect("valid regex")
});

pub(super) fn check_title(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    let missing = !doc
        .meta
        .title
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());

    Ok(if missing {
        vec![Finding::single(
            Nit::unlocated("No document title could be found"),
            "The document has no title",
        )]
    } else {
        Vec::new()
    })
}

pub(super) fn check_docname(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    let Some(name) = doc.meta.docname.as_deref() else {
        return Ok(vec![Finding::single(
            Nit::unlocated("No draft name of the form draft-<name>-<nn> was found"),
            "The document does not state its draft name",
        )]);
    };

    let name = name.strip_suffix(".txt").unwrap_or(name);
    Ok(if DOCNAME_RE.is_match(name) {
        Vec::new()
    } else {
        vec![Finding::single(
            Nit::located(doc.meta.docname_line, format!("Malformed draft name '{}'", name)),
            "The draft name is malformed",
        )]
    })
}

pub(super) fn check_category(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    Ok(match doc.meta.category.as_deref() {
        Some(c) if !c.trim().is_empty() => Vec::new(),
        _ => vec![Finding::single(
            Nit::unlocated("No category or intended status was found"),
            "The RFC does not state its category",
        )],
    })
}

pub(super) fn check_authors(doc: &Document, options: &RunOptions) -> CheckResult<Vec<Finding>> {
    let authors = &doc.meta.authors;

    if authors.is_empty() {
        return Ok(vec![Finding::single(
            Nit::unlocated("No author names were found in the front matter"),
            "The document lists no authors",
        )]);
    }

    if authors.len() > MAX_AUTHORS && !options.mode.is_lenient() {
        let nits = authors[MAX_AUTHORS..]
            .iter()
            .map(|a| Nit::located(a.line, format!("Author '{}' is past the fifth", a.name)))
            .collect();
        return Ok(vec![Finding::new(
            nits,
            format!(
                "The document has {} authors, more than the recommended {}",
                authors.len(),
                MAX_AUTHORS
            ),
        )]);
    }

    Ok(Vec::new())
}

pub(super) fn check_abstract(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    Ok(if doc.meta.has_abstract || doc.find_section("Abstract").is_some() {
        Vec::new()
    } else {
        vec![Finding::single(
            Nit::unlocated("No Abstract section was found"),
            "The document has no Abstract",
        )]
    })
}

pub(super) fn check_expiry(doc: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
    let meta = &doc.meta;

    let Some(expires) = meta.expires else {
        return Ok(vec![match meta.expires_text.as_deref() {
            Some(text) => Finding::single(
                Nit::located(
                    meta.expires_line,
                    format!("Expiration date '{}' is not a recognizable date", text),
                ),
                "The expiration date could not be understood",
            ),
            None => Finding::single(
                Nit::unlocated("No expiration date was found"),
                "The draft does not state when it expires",
            ),
        }]);
    };
    let Some(date) = meta.date else {
        // Nothing to compare against; the parser already reported the missing date.
        return Ok(Vec::new());
    };

    let days = (expires - date).num_days();
    let mut nits = Vec::new();
    if days <= 0 {
        nits.push(Nit::located(
            meta.expires_line,
            format!("Expiration date {} is not after the document date {}", expires, date),
        ));
    } else if days > MAX_EXPIRY_DAYS {
        nits.push(Nit::located(
            meta.expires_line,
            format!("Expiration date is {} days after the document date", days),
        ));
    }

    Ok(collect(nits, |_| {
        "The expiration date is inconsistent with the document date".to_string()
    }))
}
