//! Findings and their severities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Finding severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Err,
    Warn,
    Comm,
}

impl Severity {
    /// All severities, in reporting order.
    pub const ALL: [Severity; 3] = [Severity::Err, Severity::Warn, Severity::Comm];

    /// Short key, as used in reports.
    pub fn key(&self) -> &'static str {
        match self {
            Severity::Err => "err",
            Severity::Warn => "warn",
            Severity::Comm => "comm",
        }
    }

    /// Long form, e.g. `error`.
    pub fn long_form(&self) -> &'static str {
        match self {
            Severity::Err => "error",
            Severity::Warn => "warning",
            Severity::Comm => "comment",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single located diagnostic.
///
/// Messages never end with a period; the reporter enforces this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Nit {
    /// 1-indexed source line
    pub num: Option<usize>,
    pub msg: String,
}

impl Nit {
    pub fn at(num: usize, msg: impl Into<String>) -> Self {
        Self {
            num: Some(num),
            msg: msg.into(),
        }
    }

    pub fn unlocated(msg: impl Into<String>) -> Self {
        Self {
            num: None,
            msg: msg.into(),
        }
    }

    pub fn located(num: Option<usize>, msg: impl Into<String>) -> Self {
        Self {
            num,
            msg: msg.into(),
        }
    }
}

/// A group of nits sharing one summary message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub nits: Vec<Nit>,
    pub msg: String,
}

impl Finding {
    pub fn new(nits: Vec<Nit>, msg: impl Into<String>) -> Self {
        Self {
            nits,
            msg: msg.into(),
        }
    }

    /// A finding with a single nit.
    pub fn single(nit: Nit, msg: impl Into<String>) -> Self {
        Self::new(vec![nit], msg)
    }

    /// Whether neither the summary nor any nit message ends with a period.
    pub fn is_well_formed(&self) -> bool {
        !self.msg.ends_with('.') && self.nits.iter().all(|n| !n.msg.ends_with('.'))
    }
}

/// `"1 line"`, `"2 lines"`.
pub fn count_of(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Err.key(), "err");
        assert_eq!(Severity::Warn.long_form(), "warning");
        assert_eq!(Severity::Comm.to_string(), "comm");
        assert_eq!(Severity::ALL[0], Severity::Err);
    }

    #[test]
    fn test_finding_well_formed() {
        let ok = Finding::single(Nit::at(3, "Line is too long"), "Found 1 long line");
        assert!(ok.is_well_formed());

        let bad_summary = Finding::new(Vec::new(), "Found a problem.");
        assert!(!bad_summary.is_well_formed());

        let bad_nit = Finding::single(Nit::unlocated("Oops."), "Found a problem");
        assert!(!bad_nit.is_well_formed());
    }

    #[test]
    fn test_count_of() {
        assert_eq!(count_of(1, "line"), "1 line");
        assert_eq!(count_of(0, "line"), "0 lines");
        assert_eq!(count_of(2, "parse error"), "2 parse errors");
    }
}
