//! Check command - Parse and check each document.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use idnits_checks::{render_json, render_report, Checker, RuleSet, RunTally};
use idnits_doc::{parse, RunOptions};

use super::{Cli, OutputFormat};

pub fn execute(cli: &Cli) -> Result<RunTally> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Check every document named on the command line, writing reports to `out`.
///
/// A document that cannot be parsed ends the run with
/// `Could not parse <file>: <reason>`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<RunTally> {
    let options = cli.run_options();
    let rules = RuleSet::standard();
    let checker = Checker::new(&rules);
    let mut tally = RunTally::default();

    info!(
        "Checking {} document(s) in {} mode",
        cli.documents.len(),
        options.mode
    );

    for path in &cli.documents {
        check_document(&checker, path, &options, cli.output, out, &mut tally)?;
    }

    out.flush()?;
    Ok(tally)
}

fn check_document(
    checker: &Checker<'_>,
    path: &Path,
    options: &RunOptions,
    output: OutputFormat,
    out: &mut impl Write,
    tally: &mut RunTally,
) -> Result<()> {
    let name = path.display().to_string();

    if output == OutputFormat::Text {
        writeln!(out, "Inspecting file {}", name)?;
    }

    let doc = parse(path, options).with_context(|| format!("Could not parse {}", name))?;
    let report = checker
        .check(&doc, options)
        .with_context(|| format!("Failed to check {}", name))?;
    tally.record(&report);

    match output {
        OutputFormat::Text => {
            write!(out, "{}", render_report(&name, &report, options.verbose))?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", render_json(&doc, &report)?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    const XML_DRAFT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rfc docName="draft-smith-sample-00" version="3">
  <front>
    <title>A Sample Protocol</title>
    <author fullname="Jane Smith"/>
    <date year="2024" month="3"/>
    <abstract><t>Sample.</t></abstract>
  </front>
  <middle>
    <section><name>Introduction</name><t>See <xref target="RFC9999"/>.</t></section>
  </middle>
</rfc>
"#;

    fn run_with(args: &[&str]) -> (RunTally, String) {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        let tally = run(&cli, &mut out).unwrap();
        (tally, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_text_report() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("draft.xml");
        fs::write(&path, XML_DRAFT).unwrap();
        let file = path.to_str().unwrap();

        let (tally, out) = run_with(&["idnits", file]);
        assert_eq!(tally.documents, 1);
        assert_eq!(tally.warnings, 1);
        assert!(!tally.has_errors());
        assert!(out.starts_with(&format!("Inspecting file {}\n", file)));
        assert!(out.contains("Use --verbose mode"));
        assert!(out.ends_with("Found 0 errors, 1 warning, 0 comments.\n"));

        let (_, verbose) = run_with(&["idnits", "--verbose", file]);
        let nit_line = format!("\n{}(10): Citation [RFC9999] has no matching reference\n", file);
        assert!(verbose.contains(&nit_line));
        assert!(!verbose.contains("Use --verbose mode"));
    }

    #[test]
    fn test_json_report() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("draft.xml");
        fs::write(&path, XML_DRAFT).unwrap();

        let (_, out) = run_with(&["idnits", "--output", "json", path.to_str().unwrap()]);
        assert!(out.contains("\"format\": \"xml\""));
        assert!(out.contains("\"doc_type\": \"ids\""));
        assert!(out.contains("\"warnings\": 1"));
    }

    #[test]
    fn test_unparseable_document_stops_run() {
        let temp = tempdir().unwrap();
        let good = temp.path().join("draft.xml");
        fs::write(&good, XML_DRAFT).unwrap();
        let missing = temp.path().join("missing.txt");
        let missing_name = missing.to_str().unwrap();

        let cli = Cli::try_parse_from(["idnits", missing_name, good.to_str().unwrap()]).unwrap();
        let mut out = Vec::new();
        let err = run(&cli, &mut out).unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.starts_with(&format!("Could not parse {}: ", missing_name)), "{}", message);

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, format!("Inspecting file {}\n", missing_name));
    }
}
