//! Cross-checks between in-text citations and reference entries.

use idnits_doc::{Document, RunOptions};

use super::collect;
use crate::error::CheckResult;
use crate::nit::{count_of, Finding, Nit};

pub(super) fn check_undefined_citations(
    doc: &Document,
    _: &RunOptions,
) -> CheckResult<Vec<Finding>> {
    let nits = doc
        .citations
        .iter()
        .filter(|c| !doc.has_reference(&c.anchor))
        .map(|c| Nit::at(c.line, format!("Citation [{}] has no matching reference", c.anchor)))
        .collect();

    Ok(collect(nits, |n| {
        format!("Found {} without a matching reference", count_of(n, "citation"))
    }))
}

/// Lenient mode only reports unused normative references.
pub(super) fn check_unused_references(
    doc: &Document,
    options: &RunOptions,
) -> CheckResult<Vec<Finding>> {
    let lenient = options.mode.is_lenient();

    let nits = doc
        .references
        .iter()
        .filter(|r| r.normative || !lenient)
        .filter(|r| !doc.is_cited(&r.anchor))
        .map(|r| Nit::at(r.line, format!("Reference [{}] is not cited in the text", r.anchor)))
        .collect();

    Ok(collect(nits, |n| format!("Found {}", count_of(n, "unused reference"))))
}
