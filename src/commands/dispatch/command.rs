//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use lettergrade_core::config::{GraderConfig, CONFIG_FILE};
use lettergrade_core::error::Result;
use tracing::debug;

/// Resolve the config file: `--config` / `LETTERGRADE_CONFIG`, else `./lettergrade.toml`
pub fn resolve_config_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.config {
        return Some(path.clone());
    }
    let local = Path::new(CONFIG_FILE);
    local.exists().then(|| local.to_path_buf())
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Load the grader config, falling back to defaults when no file exists
    pub fn load_config(&self) -> Result<GraderConfig> {
        match resolve_config_path(self.cli) {
            Some(path) => {
                debug!(path = %path.display(), "load_config");
                GraderConfig::load(&path)
            }
            None => {
                debug!("no config file, using defaults");
                Ok(GraderConfig::default())
            }
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("lettergrade {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Grader for the letter-frequency counting homework.");
        println!();
        println!("Run `lettergrade --help` for usage information.");
        Ok(())
    }
}
