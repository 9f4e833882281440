//! Command dispatch logic for lettergrade

use std::time::Instant;

use crate::cli::{Cli, Commands};
use lettergrade_core::error::Result;
use tracing::debug;

mod command;

use command::NoCommand;
pub use command::{Command, CommandContext};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let ctx = CommandContext::new(cli, start);

    debug!(elapsed = ?start.elapsed(), "dispatch");

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Check(args) => super::check::execute(ctx, args),
            Commands::Variant(args) => super::variant::execute(ctx, args),
            Commands::Init { force } => super::init::execute(ctx, *force),
        }
    }
}
