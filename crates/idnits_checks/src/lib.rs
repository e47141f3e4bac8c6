//! # idnits_checks
//!
//! Conformance rules, the check engine and report rendering for idnits.
//!
//! This crate provides:
//! - **Rules**: checks tagged with the formats and document types they apply to
//! - **Rule sets**: an ordered registry, including documented placeholder rules
//! - **Checker**: runs the applicable rules and buckets findings by severity
//! - **Reports**: text and JSON rendering, and the rule listing
//!
//! ## Example
//!
//! ```rust,no_run
//! use idnits_checks::{render_report, Checker, RuleSet};
//! use idnits_doc::{parse, RunOptions};
//!
//! let options = RunOptions::default();
//! let rules = RuleSet::standard();
//! let doc = parse("draft-smith-sample-00.txt", &options).unwrap();
//!
//! let report = Checker::new(&rules).check(&doc, &options).unwrap();
//! print!("{}", render_report("draft-smith-sample-00.txt", &report, options.verbose));
//! ```

pub mod checks;
pub mod engine;
pub mod error;
pub mod nit;
pub mod report;
pub mod rules;

pub use engine::{parse_error_finding, CheckReport, Checker};
pub use error::{CheckError, CheckResult};
pub use nit::{Finding, Nit, Severity};
pub use report::{render_json, render_listing, render_report, summary, RunTally};
pub use rules::{Applies, CheckFn, Rule, RuleListing, RuleSet};
