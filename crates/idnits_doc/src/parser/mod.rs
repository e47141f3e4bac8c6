//! Format parsers.
//!
//! [`parse`] reads a file, works out which format it is in, and hands it to
//! the matching parser. Every parser is tolerant: malformed content is
//! recorded as [`ParseDiagnostic`]s on the returned [`Document`]. Only input
//! that no parser recognizes is reported as a [`DocError`].

mod dates;
mod text;
mod xml;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DocError, DocResult};
use crate::models::{Document, Format, ParseDiagnostic};
use crate::options::{Mode, RunOptions};

/// Parse the document at `path`.
pub fn parse(path: impl AsRef<Path>, options: &RunOptions) -> DocResult<Document> {
    let path = path.as_ref();
    debug!("Reading document from {:?}", path);

    let bytes = fs::read(path).map_err(|source| DocError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(path, &bytes, options)
}

/// Parse raw file content that was read from `path`.
pub fn parse_bytes(
    path: impl Into<PathBuf>,
    bytes: &[u8],
    options: &RunOptions,
) -> DocResult<Document> {
    let content = std::str::from_utf8(bytes).map_err(|e| DocError::NotUtf8(e.valid_up_to()))?;
    parse_str(path, content, options)
}

/// Parse document text that was read from `path`.
pub fn parse_str(
    path: impl Into<PathBuf>,
    content: &str,
    options: &RunOptions,
) -> DocResult<Document> {
    let path = path.into();
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if content.trim().is_empty() {
        return Err(DocError::Empty);
    }

    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    if let Some(idx) = lines.iter().position(|l| l.contains('\0')) {
        return Err(DocError::Binary(idx + 1));
    }

    let format = detect_format(content, options.mode);
    info!("Parsing {:?} as {} ({} lines)", path, format, lines.len());

    let doc = match format {
        Format::Xml => xml::parse_xml(path, content, lines)?,
        Format::Txt | Format::Ids => text::parse_text(path, lines, format),
    };

    if !doc.err.is_empty() {
        debug!("{} parse diagnostic(s) for {:?}", doc.err.len(), doc.path);
    }
    Ok(doc)
}

/// Work out the format of `content`.
///
/// XML is recognized by its prolog or an `<rfc>` root. Anything else is
/// text, which in submission mode is the unpaginated submission format.
pub fn detect_format(content: &str, mode: Mode) -> Format {
    let head = content.trim_start_matches('\u{feff}').trim_start();
    if head.starts_with("<?xml") || head.starts_with("<rfc") || head.starts_with("<!DOCTYPE rfc")
    {
        Format::Xml
    } else if mode == Mode::Submission {
        Format::Ids
    } else {
        Format::Txt
    }
}

/// Build a diagnostic whose line number is kept inside the document.
pub(crate) fn located(
    line: usize,
    line_count: usize,
    message: impl Into<String>,
) -> ParseDiagnostic {
    if line_count == 0 {
        ParseDiagnostic::unlocated(message)
    } else {
        ParseDiagnostic::at(line.clamp(1, line_count), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("<?xml version='1.0'?>\n<rfc/>", Mode::Normal), Format::Xml);
        assert_eq!(detect_format("\n  <rfc docName='x'/>", Mode::Submission), Format::Xml);
        assert_eq!(detect_format("Internet-Draft", Mode::Normal), Format::Txt);
        assert_eq!(detect_format("Internet-Draft", Mode::Lenient), Format::Txt);
        assert_eq!(detect_format("Internet-Draft", Mode::Submission), Format::Ids);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let err = parse_str("empty.txt", "  \n\n", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, DocError::Empty));
    }

    #[test]
    fn test_binary_input_is_fatal() {
        let err = parse_str("blob.txt", "abc\nde\0f\n", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, DocError::Binary(2)));
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let err = parse_bytes("bad.txt", b"ab\xffcd", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, DocError::NotUtf8(2)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = parse("/nonexistent/draft-none-00.txt", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, DocError::Unreadable { .. }));
    }

    #[test]
    fn test_located_clamps_line() {
        assert_eq!(located(10, 3, "x").line, Some(3));
        assert_eq!(located(0, 3, "x").line, Some(1));
        assert_eq!(located(5, 0, "x").line, None);
    }
}
