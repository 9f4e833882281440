//! `lettergrade variant` command - show a student's variant

use crate::cli::{OutputFormat, VariantArgs};
use crate::commands::dispatch::CommandContext;
use lettergrade_core::error::Result;
use lettergrade_core::reference::ReferenceSource;

/// Execute the variant command
pub fn execute(ctx: &CommandContext, args: &VariantArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let variant = config.selector()?.select(&args.identifier);
    let reference = config.directory_source().key(variant);
    let image_url = config.image_url(variant);

    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "identifier": args.identifier,
                    "variant": variant,
                    "num_variants": config.num_variants,
                    "reference": reference,
                    "image_url": image_url,
                })
            );
        }
        OutputFormat::Human => {
            println!("{variant}");
            if !ctx.cli.quiet {
                println!("reference: {reference}");
                if let Some(url) = image_url {
                    println!("image: {url}");
                }
            }
        }
    }

    Ok(())
}
