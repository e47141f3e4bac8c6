//! Check engine.
//!
//! The [`Checker`] runs every applicable rule of a [`RuleSet`] against one
//! parsed document and collects the findings into severity buckets.

use idnits_doc::{Document, ParseDiagnostic, RunOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CheckError, CheckResult};
use crate::nit::{count_of, Finding, Nit, Severity};
use crate::rules::{Rule, RuleSet};

/// Findings for one document, partitioned by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub err: Vec<Finding>,
    pub warn: Vec<Finding>,
    pub comm: Vec<Finding>,
}

impl CheckReport {
    pub fn bucket(&self, severity: Severity) -> &[Finding] {
        match severity {
            Severity::Err => &self.err,
            Severity::Warn => &self.warn,
            Severity::Comm => &self.comm,
        }
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<Finding> {
        match severity {
            Severity::Err => &mut self.err,
            Severity::Warn => &mut self.warn,
            Severity::Comm => &mut self.comm,
        }
    }

    pub fn push(&mut self, severity: Severity, finding: Finding) {
        self.bucket_mut(severity).push(finding);
    }

    /// Buckets in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &[Finding])> {
        Severity::ALL.into_iter().map(move |s| (s, self.bucket(s)))
    }

    pub fn error_count(&self) -> usize {
        self.err.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warn.len()
    }

    pub fn comment_count(&self) -> usize {
        self.comm.len()
    }

    pub fn total(&self) -> usize {
        self.err.len() + self.warn.len() + self.comm.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Turn parse diagnostics into the single leading error finding.
pub fn parse_error_finding(diagnostics: &[ParseDiagnostic]) -> Option<Finding> {
    if diagnostics.is_empty() {
        return None;
    }

    let nits = diagnostics
        .iter()
        .map(|d| Nit::located(d.line, d.message.trim_end().trim_end_matches('.')))
        .collect();

    Some(Finding::new(
        nits,
        format!(
            "Found {} while processing file. The result may be incomplete",
            count_of(diagnostics.len(), "parse error")
        ),
    ))
}

/// Runs a rule set against documents.
#[derive(Debug, Clone, Copy)]
pub struct Checker<'r> {
    rules: &'r RuleSet,
}

impl<'r> Checker<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        self.rules
    }

    /// Check one document.
    ///
    /// Rules run in registration order. A rule that fails, or that reports a
    /// line outside the document, aborts the whole check.
    pub fn check(&self, doc: &Document, options: &RunOptions) -> CheckResult<CheckReport> {
        info!(
            "Checking {} ({}, {}) with {}",
            doc.path.display(),
            doc.format,
            doc.doc_type,
            self.rules.name
        );

        let mut report = CheckReport::default();

        if let Some(finding) = parse_error_finding(&doc.err) {
            report.push(Severity::Err, finding);
        }

        for rule in self.rules.applicable(doc.format, doc.doc_type) {
            let Some(check) = rule.check else {
                continue;
            };

            let findings = check(doc, options)?;
            debug!("Rule {} produced {} finding(s)", rule.id, findings.len());

            for finding in findings {
                validate_lines(rule, doc, &finding)?;
                report.push(rule.severity, finding);
            }
        }

        info!(
            "Found {} errors, {} warnings, {} comments in {}",
            report.error_count(),
            report.warning_count(),
            report.comment_count(),
            doc.path.display()
        );

        Ok(report)
    }
}

fn validate_lines(rule: &Rule, doc: &Document, finding: &Finding) -> CheckResult<()> {
    for nit in &finding.nits {
        if let Some(num) = nit.num {
            if doc.line(num).is_none() {
                return Err(CheckError::rule_failed(
                    rule.id,
                    format!(
                        "reported line {} of a {}-line document",
                        num,
                        doc.line_count()
                    ),
                ));
            }
        }
    }
    Ok(())
}
