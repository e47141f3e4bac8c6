//! # idnits_doc
//!
//! Document model and format parsers for idnits.
//!
//! Internet-Drafts and RFCs arrive as xml2rfc source, paginated plain text,
//! or unpaginated pre-submission text. Each parser turns its input into the
//! same [`Document`] model so that checks never need to know where the data
//! came from.
//!
//! Parsers are tolerant. Malformed but recognizable input still produces a
//! `Document`, with whatever could not be extracted recorded in
//! [`Document::err`]. Only input that no parser accepts is an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use idnits_doc::{parse, RunOptions};
//!
//! let doc = parse("draft-smith-sample-00.txt", &RunOptions::default()).unwrap();
//! println!("{:?} ({}, {})", doc.meta.title, doc.format, doc.doc_type);
//! for diag in &doc.err {
//!     eprintln!("{:?}: {}", diag.line, diag.message);
//! }
//! ```

pub mod error;
pub mod models;
pub mod options;
pub mod parser;

pub use error::{DocError, DocResult};
pub use models::{
    Author, Citation, DocType, Document, Format, Metadata, ParseDiagnostic, Reference, Section,
};
pub use options::{Mode, RunOptions};
pub use parser::{detect_format, parse, parse_bytes, parse_str};
