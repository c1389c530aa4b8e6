//! Providers command - list providers.

use anyhow::Result;
use clap::Args;
use storagecmp_core::Provider;
use storagecmp_store::ContentLoader;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the providers command.
#[derive(Args, Default)]
pub struct ProvidersArgs {
    /// Only providers supporting this protocol (case-insensitive, e.g. "s3").
    #[arg(long)]
    pub protocol: Option<String>,
}

/// Returns true if the provider matches the protocol filter.
pub fn matches_protocol(provider: &Provider, filter: Option<&str>) -> bool {
    filter.is_none_or(|token| {
        provider
            .protocols
            .iter()
            .any(|p| p.as_str().eq_ignore_ascii_case(token))
    })
}

/// Runs the providers command.
pub async fn run(args: &ProvidersArgs, cli: &Cli) -> Result<()> {
    let config = cli.load_config().await?;
    let content = ContentLoader::from_config(&config).load_content().await?;
    info!(providers = content.provider_count(), "Listing providers");

    let filter = args.protocol.as_deref();
    let providers: Vec<&Provider> = content
        .providers()
        .filter(|p| matches_protocol(p, filter))
        .collect();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(90));

            for provider in &providers {
                println!("{}", formatter.format_provider_line(provider));
            }

            println!();
            println!(
                "Total: {} providers ({} plans)",
                providers.len(),
                providers.iter().map(|p| p.plans.len()).sum::<usize>()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_providers(providers)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider(protocols: &[&str]) -> Provider {
        let doc = json!({
            "providers": [{
                "name": "Acme",
                "url": "https://acme.example",
                "protocols": protocols,
                "plans": []
            }]
        });
        storagecmp_core::validate(&doc)
            .expect("valid")
            .providers
            .remove(0)
    }

    #[test]
    fn test_no_filter_matches_everything() {
        assert!(matches_protocol(&provider(&[]), None));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let p = provider(&["S3", "WebDAV"]);
        assert!(matches_protocol(&p, Some("s3")));
        assert!(matches_protocol(&p, Some("webdav")));
        assert!(!matches_protocol(&p, Some("SFTP")));
    }
}
