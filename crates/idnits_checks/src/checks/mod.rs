//! Built-in checks.
//!
//! Each check is a plain function over a parsed `Document`. Checks never
//! print; they return findings and let the reporter decide what to show.

mod front;
mod references;
mod text;
mod vocabulary;

use idnits_doc::{DocType, Format};

use crate::nit::{Finding, Nit, Severity};
use crate::rules::{Rule, RuleSet};

/// Paginated text and pre-submission text.
const TEXT_FORMATS: &[Format] = &[Format::Txt, Format::Ids];

/// Build the built-in rule set, in evaluation order.
pub fn standard_rules() -> RuleSet {
    let mut rules = RuleSet::new("Standard Rules");

    rules.add(Rule::new(
        "title",
        "Check that the document has a title",
        front::check_title,
    ));

    rules.add(
        Rule::new(
            "docname",
            "Check that the draft name is present and well formed",
            front::check_docname,
        )
        .for_type(DocType::Draft),
    );

    rules.add(
        Rule::new(
            "category",
            "Check that the RFC states its category",
            front::check_category,
        )
        .for_type(DocType::Rfc),
    );

    rules.add(
        Rule::new(
            "authors",
            "Check that authors are listed, and not too many of them",
            front::check_authors,
        )
        .with_severity(Severity::Warn),
    );

    rules.add(Rule::new(
        "abstract",
        "Check that the document has an Abstract",
        front::check_abstract,
    ));

    rules.add(
        Rule::new(
            "boilerplate",
            "Check for the Status of This Memo and Copyright Notice sections",
            text::check_boilerplate,
        )
        .for_formats(TEXT_FORMATS),
    );

    rules.add(
        Rule::new(
            "line-length",
            "Check that no line is longer than 72 characters",
            text::check_line_length,
        )
        .for_formats(TEXT_FORMATS),
    );

    rules.add(
        Rule::new(
            "page-length",
            "Check that no page is longer than 58 lines",
            text::check_page_length,
        )
        .for_format(Format::Txt)
        .with_severity(Severity::Warn),
    );

    rules.add(
        Rule::new(
            "pagination",
            "Check that submission text carries no page breaks or footers",
            text::check_pagination,
        )
        .for_format(Format::Ids)
        .with_severity(Severity::Warn),
    );

    rules.add(
        Rule::new(
            "undefined-citations",
            "Check that every citation has a matching reference",
            references::check_undefined_citations,
        )
        .with_severity(Severity::Warn),
    );

    rules.add(
        Rule::new(
            "unused-references",
            "Check that every reference is cited",
            references::check_unused_references,
        )
        .with_severity(Severity::Comm),
    );

    rules.add(
        Rule::new(
            "expiry",
            "Check that the expiration date follows the document date",
            front::check_expiry,
        )
        .for_formats(TEXT_FORMATS)
        .for_type(DocType::Draft)
        .with_severity(Severity::Warn),
    );

    rules.add(
        Rule::new(
            "xml-version",
            "Check that the source declares the v3 vocabulary",
            vocabulary::check_xml_version,
        )
        .for_format(Format::Xml)
        .with_severity(Severity::Comm),
    );

    rules.add(
        Rule::new(
            "characters",
            "Check for control characters and non-ASCII text",
            text::check_characters,
        )
        .for_formats(TEXT_FORMATS),
    );

    rules.add(Rule::placeholder(
        "iana-considerations",
        "Check that the IANA Considerations section is complete",
    ));

    rules.add(
        Rule::placeholder(
            "security-considerations",
            "Check that the Security Considerations section is not empty",
        )
        .with_severity(Severity::Warn),
    );

    rules
}

/// Wrap nits in a finding, or nothing when there are none.
fn collect(nits: Vec<Nit>, summary: impl FnOnce(usize) -> String) -> Vec<Finding> {
    if nits.is_empty() {
        Vec::new()
    } else {
        let msg = summary(nits.len());
        vec![Finding::new(nits, msg)]
    }
}
