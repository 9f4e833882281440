//! `lettergrade check` command - grade one submission

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::{CheckArgs, OutputFormat};
use crate::commands::dispatch::CommandContext;
use lettergrade_core::engine::Grader;
use lettergrade_core::error::{LetterError, Result};
use lettergrade_core::format::render_verdict;
use lettergrade_core::trace_time;
use tracing::debug;

/// Read the submission from a file, or stdin for `-`/no path
fn read_submission(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p)
            .map_err(|e| LetterError::io_operation("read submission", p.display(), e)),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| LetterError::io_operation("read submission", "stdin", e))?;
            Ok(buf)
        }
    }
}

/// Execute the check command
pub fn execute(ctx: &CommandContext, args: &CheckArgs) -> Result<()> {
    let mut config = ctx.load_config()?;
    if let Some(dir) = &args.reference_dir {
        config.reference_dir = dir.clone();
    }
    if args.lenient {
        config.strict_completeness = false;
    }
    let params = config.params(args.max_error_budget, args.reward_points);

    let submission = read_submission(args.submission.as_deref())?;
    trace_time!(ctx.start, "read_submission");
    debug!(bytes = submission.len(), "submission");

    let grader = Grader::from_config(&config)?;
    let verdict = grader.grade(&args.identifier, &submission, &params);

    if !ctx.cli.quiet || !verdict.accepted {
        println!("{}", render_verdict(&verdict, ctx.cli.format)?);
    }
    if let Some(url) = verdict.variant.and_then(|v| config.image_url(v)) {
        if ctx.cli.format == OutputFormat::Human && !ctx.cli.quiet {
            println!("variant image: {url}");
        }
    }

    match &verdict.rejection {
        None => Ok(()),
        Some(rejection) => Err(LetterError::rejected(rejection)),
    }
}
