//! Config command - manage configuration.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use storagecmp_store::Config;
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the configuration file path and content root.
    Path,

    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli).await,
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = cli.load_config().await?;

    match cli.format {
        OutputFormat::Text => {
            println!("storagecmp Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Content root:    {}", config.content_root().display());
            println!("Collection:      {}", config.content.collection);
            println!("Source pattern:  {}", config.content.source);
            println!();
            println!("Unknown fields:  {:?}", config.validation.unknown_fields);
            println!("Protocols:       {:?}", config.validation.protocols);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

async fn show_paths(cli: &Cli) -> Result<()> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = cli.load_config().await?;

    match cli.format {
        OutputFormat::Text => {
            println!("Config file:   {}", path.display());
            println!("Content root:  {}", config.content_root().display());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = serde_json::json!({
                "configFile": path.display().to_string(),
                "contentRoot": config.content_root().display().to_string(),
            });
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    Config::default().save_to(&path).await?;
    info!(path = %path.display(), "Wrote default configuration");

    if !cli.quiet {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
