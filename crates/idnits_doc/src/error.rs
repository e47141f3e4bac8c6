//! Error types for document parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for document operations.
pub type DocResult<T> = Result<T, DocError>;

/// Fatal errors raised when no parser can handle an input.
///
/// Malformed but recognizable content never ends up here; it is recorded as
/// a [`ParseDiagnostic`](crate::models::ParseDiagnostic) on the document.
#[derive(Error, Debug)]
pub enum DocError {
    #[error("Could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is empty")]
    Empty,

    #[error("File is not valid UTF-8 text (invalid byte at offset {0})")]
    NotUtf8(usize),

    #[error("File looks like binary data (NUL byte on line {0})")]
    Binary(usize),

    #[error("Unsupported XML vocabulary: expected <rfc> root element, found <{0}>")]
    UnsupportedXmlRoot(String),
}
