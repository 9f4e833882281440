//! Output format handling
//!
//! - human: the verdict message, one diagnostic per line
//! - json: the serialized verdict, stable for scripts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LetterError;
use crate::grade::Verdict;

/// Output format for lettergrade commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = LetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(LetterError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a verdict in the requested format
pub fn render_verdict(verdict: &Verdict, format: OutputFormat) -> Result<String, LetterError> {
    match format {
        OutputFormat::Human => {
            let status = if verdict.accepted { "ACCEPTED" } else { "REJECTED" };
            Ok(format!("{status}\n{}", verdict.message()))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(verdict)?),
    }
}
