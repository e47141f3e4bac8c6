//! Run options shared by parsers and checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How strictly structural deviations are judged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Normal,
    /// Report only the more serious deviations
    Lenient,
    /// Treat text input as a pre-submission document
    Submission,
}

impl Mode {
    pub fn is_lenient(&self) -> bool {
        matches!(self, Mode::Lenient)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Normal => "normal",
            Mode::Lenient => "lenient",
            Mode::Submission => "submission",
        })
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "lenient" => Ok(Mode::Lenient),
            "submission" => Ok(Mode::Submission),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// Options for one checker run.
///
/// `verbose` only changes how results are rendered, never what is computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: Mode,
    pub verbose: bool,
    pub debug: bool,
}

impl RunOptions {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }
}
