//! Error types for the checker.

use thiserror::Error;

/// Result type alias for check operations.
pub type CheckResult<T> = Result<T, CheckError>;

/// Errors that abort checking a document.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Rule evaluation failed: {rule} - {message}")]
    RuleFailed { rule: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckError {
    pub fn rule_failed(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleFailed {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
