//! `lettergrade init` command - write a default config file

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use lettergrade_core::config::{GraderConfig, CONFIG_FILE};
use lettergrade_core::error::{LetterError, Result};

/// Execute the init command
pub fn execute(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = ctx
        .cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    if path.exists() && !force {
        return Err(LetterError::already_exists("config", path.display()));
    }

    GraderConfig::default().save(&path)?;

    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "status": "ok", "path": path.display().to_string() })
            );
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
