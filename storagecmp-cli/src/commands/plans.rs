//! Plans command - list plans.

use anyhow::{bail, Result};
use clap::Args;
use storagecmp_store::ContentLoader;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the plans command.
#[derive(Args, Default)]
pub struct PlansArgs {
    /// Only plans of this provider (exact name).
    #[arg(long, short)]
    pub provider: Option<String>,
}

/// Runs the plans command.
pub async fn run(args: &PlansArgs, cli: &Cli) -> Result<()> {
    let config = cli.load_config().await?;
    let content = ContentLoader::from_config(&config).load_content().await?;

    if let Some(name) = &args.provider {
        if content.provider(name).is_none() {
            bail!("Unknown provider: {name}");
        }
    }

    let plans: Vec<_> = content
        .plans()
        .filter(|(provider, _)| args.provider.as_ref().is_none_or(|name| &provider.name == name))
        .collect();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_plans_header());
            println!("{}", "─".repeat(90));

            for (provider, plan) in &plans {
                println!("{}", formatter.format_plan_line(provider, plan));
            }

            println!();
            println!("Total: {} plans", plans.len());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_plans(plans)?);
        }
    }

    Ok(())
}
