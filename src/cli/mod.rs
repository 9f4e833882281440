//! CLI argument parsing for lettergrade
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{CheckArgs, VariantArgs};
pub use lettergrade_core::format::OutputFormat;
use parse::parse_output_format;

/// Lettergrade - grader for the letter-frequency counting homework
#[derive(Parser, Debug)]
#[command(name = "lettergrade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to lettergrade.toml
    #[arg(long, global = true, env = "LETTERGRADE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. `debug` or `lettergrade_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade a submission against the student's reference answers
    Check(CheckArgs),

    /// Show which variant a student was assigned
    Variant(VariantArgs),

    /// Write a default lettergrade.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
