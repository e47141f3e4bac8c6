//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use idnits_doc::{Mode, RunOptions};

pub mod check;
pub mod list;

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// idnits - check Internet-Drafts and RFCs for conformance nits
#[derive(Parser, Debug)]
#[command(name = "idnits")]
#[command(version, about = "Check Internet-Drafts and RFCs for conformance nits")]
#[command(long_about = r#"
idnits inspects Internet-Drafts and RFCs in xml2rfc, plain text, or
pre-submission text form and reports errors, warnings and comments about
their conformance to the document formatting and content requirements.

MODES:
  normal      → Report every nit the rules find
  lenient     → Report only the more serious nits
  submission  → Treat text input as a pre-submission document

EXIT CODES:
  0 - No errors found
  1 - Errors found, or a document could not be parsed
  2 - Invalid arguments
"#)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// List the available checks and exit
    #[arg(short, long)]
    pub list: bool,

    /// Checking mode: normal, lenient or submission
    #[arg(short, long, env = "IDNITS_MODE", default_value = "normal")]
    pub mode: Mode,

    /// Show every nit with its line number
    #[arg(short, long)]
    pub verbose: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Documents to check
    #[arg(value_name = "DOC", required_unless_present = "list")]
    pub documents: Vec<PathBuf>,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions::new(self.mode)
            .verbose(self.verbose)
            .debug(self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "idnits",
            "-v",
            "-m",
            "lenient",
            "--output",
            "json",
            "a.txt",
            "b.xml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(!cli.debug);
        assert_eq!(cli.mode, Mode::Lenient);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.documents.len(), 2);

        let options = cli.run_options();
        assert_eq!(options.mode, Mode::Lenient);
        assert!(options.verbose);
    }

    #[test]
    fn test_documents_required_unless_listing() {
        assert!(Cli::try_parse_from(["idnits"]).is_err());

        let cli = Cli::try_parse_from(["idnits", "--list"]).unwrap();
        assert!(cli.list);
        assert!(cli.documents.is_empty());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["idnits", "-m", "strict", "a.txt"]).is_err());
    }
}
