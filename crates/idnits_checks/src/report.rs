//! Report rendering.

use idnits_doc::Document;
use serde::Serialize;

use crate::engine::CheckReport;
use crate::error::CheckResult;
use crate::nit::{count_of, Finding, Severity};
use crate::rules::RuleListing;

const VERBOSE_HINT: &str = "Use --verbose mode to get a line-by-line listing of the issues found.";

/// Render the findings of one document as text.
///
/// Sections appear in error, warning, comment order and only when
/// non-empty. In verbose mode each finding is followed by its nits, one per
/// line, as `file(line): message`.
///
/// # Panics
///
/// Panics if any summary or nit message ends with a period.
pub fn render_report(file: &str, report: &CheckReport, verbose: bool) -> String {
    let mut out = String::new();

    for (severity, findings) in report.iter() {
        if findings.is_empty() {
            continue;
        }

        out.push_str(&format!("\n{}:\n\n", heading(severity, findings.len())));
        for finding in findings {
            render_finding(&mut out, file, finding, verbose);
        }
    }

    out.push('\n');
    if report.total() > 0 && !verbose {
        out.push_str(VERBOSE_HINT);
        out.push_str("\n\n");
    }
    out.push_str(&summary(report));
    out.push('\n');
    out
}

fn render_finding(out: &mut String, file: &str, finding: &Finding, verbose: bool) {
    assert!(
        finding.is_well_formed(),
        "finding message ends with a period: {:?}",
        finding
    );

    if !verbose {
        out.push_str(&format!("   {}.\n", finding.msg));
        return;
    }

    out.push_str(&format!("   {}:\n\n", finding.msg));
    for nit in &finding.nits {
        match nit.num {
            Some(num) => out.push_str(&format!("{}({}): {}\n", file, num, nit.msg)),
            None => out.push_str(&format!("{}: {}\n", file, nit.msg)),
        }
    }
    out.push('\n');
}

/// `"Errors"`, `"Warning"`, ...
fn heading(severity: Severity, count: usize) -> String {
    let long = severity.long_form();
    let mut heading = long[..1].to_uppercase();
    heading.push_str(&long[1..]);
    if count != 1 {
        heading.push('s');
    }
    heading
}

/// The closing count line for one document.
pub fn summary(report: &CheckReport) -> String {
    format!(
        "Found {}, {}, {}.",
        count_of(report.error_count(), "error"),
        count_of(report.warning_count(), "warning"),
        count_of(report.comment_count(), "comment")
    )
}

/// Render the rule listing table.
///
/// The format column widens to fit labels such as `TXT/IDs`.
pub fn render_listing(listing: &[RuleListing]) -> String {
    let width = listing.iter().map(|row| row.fmt.len()).max().unwrap_or(0).max(3);

    let mut out = String::new();
    out.push_str(&format!("{:>width$}  {:>3}  {}\n", "Fmt", "Doc", "Comment"));
    out.push_str(&format!("{:>width$}  {:>3}  {}\n\n", "---", "---", "-------"));
    for row in listing {
        out.push_str(&format!(
            "{:>width$}  {:>3}  {}\n",
            row.fmt, row.doc_type, row.description
        ));
    }
    out
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    comments: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: String,
    format: String,
    doc_type: String,
    #[serde(flatten)]
    report: &'a CheckReport,
    summary: JsonSummary,
}

/// Render the findings of one document as JSON.
pub fn render_json(doc: &Document, report: &CheckReport) -> CheckResult<String> {
    let json = JsonReport {
        file: doc.path.display().to_string(),
        format: doc.format.to_string(),
        doc_type: doc.doc_type.to_string(),
        report,
        summary: JsonSummary {
            errors: report.error_count(),
            warnings: report.warning_count(),
            comments: report.comment_count(),
        },
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Totals across every document of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    pub documents: usize,
    pub errors: usize,
    pub warnings: usize,
    pub comments: usize,
}

impl RunTally {
    pub fn record(&mut self, report: &CheckReport) {
        self.documents += 1;
        self.errors += report.error_count();
        self.warnings += report.warning_count();
        self.comments += report.comment_count();
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Process exit status: non-zero when any error-severity finding was seen.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            1
        } else {
            0
        }
    }
}
