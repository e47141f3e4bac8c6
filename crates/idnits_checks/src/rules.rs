//! Rules and rule sets.

use idnits_doc::{DocType, Document, Format, RunOptions};
use serde::Serialize;
use tracing::debug;

use crate::checks;
use crate::error::CheckResult;
use crate::nit::{Finding, Severity};

/// Signature of a rule check.
pub type CheckFn = fn(&Document, &RunOptions) -> CheckResult<Vec<Finding>>;

/// Things a rule can be restricted to that carry a short listing label.
pub trait Label {
    fn label(&self) -> &'static str;
}

impl Label for Format {
    fn label(&self) -> &'static str {
        Format::label(self)
    }
}

impl Label for DocType {
    fn label(&self) -> &'static str {
        DocType::label(self)
    }
}

/// Applicability of a rule along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applies<T: 'static> {
    Any,
    Only(T),
    OneOf(&'static [T]),
}

impl<T: Copy + PartialEq + Label + 'static> Applies<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Applies::Any => true,
            Applies::Only(wanted) => *wanted == value,
            Applies::OneOf(wanted) => wanted.contains(&value),
        }
    }

    /// Listing label, with alternatives joined by `/`.
    pub fn label(&self) -> String {
        match self {
            Applies::Any => "any".to_string(),
            Applies::Only(value) => value.label().to_string(),
            Applies::OneOf(values) => values
                .iter()
                .map(Label::label)
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

/// A registered rule.
///
/// A rule without a check is a placeholder: it appears in the registry for
/// documentation purposes but is never listed or run.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub fmt: Applies<Format>,
    pub doc_type: Applies<DocType>,
    pub severity: Severity,
    pub description: &'static str,
    pub check: Option<CheckFn>,
}

impl Rule {
    /// Create a rule that applies to every format and document type and
    /// reports errors.
    pub fn new(id: &'static str, description: &'static str, check: CheckFn) -> Self {
        Self {
            id,
            fmt: Applies::Any,
            doc_type: Applies::Any,
            severity: Severity::Err,
            description,
            check: Some(check),
        }
    }

    /// Create a rule with no implementation yet.
    pub fn placeholder(id: &'static str, description: &'static str) -> Self {
        Self {
            id,
            fmt: Applies::Any,
            doc_type: Applies::Any,
            severity: Severity::Err,
            description,
            check: None,
        }
    }

    pub fn for_format(mut self, format: Format) -> Self {
        self.fmt = Applies::Only(format);
        self
    }

    pub fn for_formats(mut self, formats: &'static [Format]) -> Self {
        self.fmt = Applies::OneOf(formats);
        self
    }

    pub fn for_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = Applies::Only(doc_type);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.check.is_none()
    }

    /// Whether the rule should run against a document of this format and type.
    pub fn applies_to(&self, format: Format, doc_type: DocType) -> bool {
        !self.is_placeholder() && self.fmt.matches(format) && self.doc_type.matches(doc_type)
    }
}

/// One row of the rule listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListing {
    pub fmt: String,
    pub doc_type: String,
    pub description: &'static str,
}

/// An ordered, immutable-after-construction set of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// The built-in rule set.
    pub fn standard() -> Self {
        checks::standard_rules()
    }

    /// Append a rule. Registration order is evaluation and listing order.
    pub fn add(&mut self, rule: Rule) {
        debug!(
            "Registering rule {} ({}, {}, {})",
            rule.id,
            rule.fmt.label(),
            rule.doc_type.label(),
            rule.severity
        );
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add(rule);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// All rules, placeholders included, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules to run for a document of the given format and type.
    pub fn applicable(&self, format: Format, doc_type: DocType) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(move |r| r.applies_to(format, doc_type))
    }

    /// Listing rows for every implemented rule.
    pub fn listing(&self) -> Vec<RuleListing> {
        self.rules
            .iter()
            .filter(|r| !r.is_placeholder())
            .map(|r| RuleListing {
                fmt: r.fmt.label(),
                doc_type: r.doc_type.label(),
                description: r.description,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nothing(_: &Document, _: &RunOptions) -> CheckResult<Vec<Finding>> {
        Ok(Vec::new())
    }

    #[test]
    fn test_applies_matching() {
        assert!(Applies::<Format>::Any.matches(Format::Xml));
        assert!(Applies::Only(Format::Txt).matches(Format::Txt));
        assert!(!Applies::Only(Format::Txt).matches(Format::Ids));
        assert_eq!(Applies::<DocType>::Any.label(), "any");
        assert_eq!(Applies::Only(DocType::Draft).label(), "IDs");
        assert_eq!(Applies::Only(Format::Xml).label(), "XML");
    }

    #[test]
    fn test_applies_one_of() {
        let text = Applies::OneOf(&[Format::Txt, Format::Ids]);
        assert!(text.matches(Format::Txt));
        assert!(text.matches(Format::Ids));
        assert!(!text.matches(Format::Xml));
        assert_eq!(text.label(), "TXT/IDs");

        let rule = Rule::new("x", "Check x", nothing).for_formats(&[Format::Txt, Format::Ids]);
        assert!(rule.applies_to(Format::Ids, DocType::Draft));
        assert!(!rule.applies_to(Format::Xml, DocType::Draft));
    }

    #[test]
    fn test_rule_builder() {
        let rule = Rule::new("x", "Check x", nothing)
            .for_format(Format::Txt)
            .for_type(DocType::Rfc)
            .with_severity(Severity::Warn);

        assert_eq!(rule.fmt, Applies::Only(Format::Txt));
        assert_eq!(rule.doc_type, Applies::Only(DocType::Rfc));
        assert_eq!(rule.severity, Severity::Warn);
        assert!(rule.applies_to(Format::Txt, DocType::Rfc));
        assert!(!rule.applies_to(Format::Txt, DocType::Draft));
        assert!(!rule.applies_to(Format::Xml, DocType::Rfc));
    }

    #[test]
    fn test_placeholders_never_apply() {
        let rule = Rule::placeholder("todo", "Check something later");
        assert!(rule.is_placeholder());
        assert!(!rule.applies_to(Format::Txt, DocType::Draft));
    }

    #[test]
    fn test_listing_keeps_order_and_skips_placeholders() {
        let set = RuleSet::new("test")
            .with_rule(Rule::new("a", "Check a", nothing))
            .with_rule(Rule::placeholder("b", "Check b"))
            .with_rule(Rule::new("c", "Check c", nothing).for_format(Format::Xml));

        assert_eq!(set.len(), 3);
        let listing = set.listing();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].description, "Check a");
        assert_eq!(listing[1].fmt, "XML");
        assert_eq!(listing[1].doc_type, "any");
    }

    #[test]
    fn test_applicable_filters() {
        let set = RuleSet::new("test")
            .with_rule(Rule::new("a", "Check a", nothing))
            .with_rule(Rule::new("b", "Check b", nothing).for_format(Format::Xml))
            .with_rule(Rule::new("c", "Check c", nothing).for_type(DocType::Rfc));

        let ids: Vec<_> = set
            .applicable(Format::Txt, DocType::Draft)
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["a"]);

        let ids: Vec<_> = set
            .applicable(Format::Xml, DocType::Rfc)
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
