//! idnits CLI - Main entry point.
//!
//! Exit codes:
//! - 0: No error-severity findings
//! - 1: Error-severity findings, an unparseable document, or a failed run
//! - 2: Invalid arguments

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::Cli;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const FINDINGS: u8 = 1;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.debug);

    let result = if cli.list {
        commands::list::execute()
    } else {
        commands::check::execute(&cli)
    };

    match result {
        Ok(tally) if tally.has_errors() => ExitCode::from(ExitCodes::FINDINGS),
        Ok(_) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(ExitCodes::FINDINGS)
        }
    }
}

/// Log to stderr so that reports on stdout stay clean.
fn init_logging(debug: bool) {
    let default = if debug { "idnits=debug" } else { "idnits=warn" };
    let filter = if debug {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}
