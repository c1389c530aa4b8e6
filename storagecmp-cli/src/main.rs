// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! storagecmp CLI - validate and inspect storage provider pricing content.
//!
//! # Examples
//!
//! ```bash
//! # Validate all content files (default command)
//! storagecmp
//!
//! # Same, with an explicit configuration file
//! storagecmp --config site/storagecmp.json check
//!
//! # JSON report for CI
//! storagecmp check --format json --pretty
//!
//! # Providers that speak S3
//! storagecmp providers --protocol S3
//!
//! # Plans of one provider
//! storagecmp plans --provider "Storage Box"
//!
//! # Write a default configuration
//! storagecmp config init
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use storagecmp_store::{Config, StoreError};
use tracing_subscriber::{fmt, prelude::*, registry::LookupSpan, EnvFilter, Layer};

use commands::{check, config, plans, providers};

// ============================================================================
// CLI Definition
// ============================================================================

/// storagecmp CLI - cloud storage pricing content tool.
#[derive(Parser)]
#[command(name = "storagecmp")]
#[command(about = "Validate and inspect cloud storage pricing content")]
#[command(long_about = r#"
storagecmp validates the provider pricing data behind the comparison site.

Every JSON file matched by the configured source pattern must contain
{"providers": [...]} in the provider plan schema. A single malformed
record fails the whole check.

Supported protocols:
  S3, SFTP, Swift, FTP, FTPS, SCP, Samba, rsync, Borg, WebDAV

Examples:
  storagecmp                         # Validate content
  storagecmp providers --protocol S3 # Providers supporting S3
  storagecmp plans                   # All plans
  storagecmp --format json check     # JSON report
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'check' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (defaults to ./storagecmp.json).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate all content files (default if no command specified).
    #[command(visible_alias = "c")]
    Check,

    /// List providers.
    #[command(visible_alias = "p")]
    Providers(providers::ProvidersArgs),

    /// List plans.
    Plans(plans::PlansArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Content failed validation.
    InvalidContent = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<StoreError>() {
            Some(e) if e.is_content_error() => Self::InvalidContent,
            _ => Self::Error,
        }
    }
}

impl Cli {
    /// Loads the configuration selected by `--config`.
    pub async fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.config.as_deref()).await?)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, no_color: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("storagecmp=debug,storagecmp_store=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(log_layer(no_color, std::io::stderr))
        .with(filter)
        .init();
}

fn log_layer<S, W>(no_color: bool, writer: W) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(!no_color)
        .with_writer(writer)
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, cli.no_color);

    let result = match &cli.command {
        Some(Commands::Check) | None => check::run(&cli).await,
        Some(Commands::Providers(args)) => providers::run(args, &cli).await,
        Some(Commands::Plans(args)) => plans::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}
