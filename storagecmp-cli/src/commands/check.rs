//! Check command - validate every content file.

use anyhow::Result;
use storagecmp_store::{relative_path, ContentLoader, StoreError};
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the check command.
///
/// Prints a per-file report and fails with [`StoreError::InvalidContent`]
/// if any file is rejected.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config().await?;
    let loader = ContentLoader::from_config(&config);
    info!(pattern = %loader.pattern(), "Checking content");

    let report = loader.load().await?;
    let root = loader.root();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            for file in &report.files {
                let path = relative_path(&file.path, root);
                match &file.result {
                    Ok(collection) if !cli.quiet => {
                        println!("{}", formatter.format_file_ok(path, collection));
                    }
                    Ok(_) => {}
                    Err(e) => println!("{}", formatter.format_file_error(path, e)),
                }
            }

            if !cli.quiet {
                println!();
                println!("{}", formatter.format_check_summary(&report));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_report(&report, root)?);
        }
    }

    if !report.is_ok() {
        return Err(StoreError::InvalidContent {
            failed: report.failure_count(),
            total: report.files.len(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    const VALID: &str = r#"{"providers":[{"name":"Acme","url":"https://acme.example","protocols":["S3"],"plans":[]}]}"#;
    const BAD_URL: &str = r#"{"providers":[{"name":"Broken","url":"not-a-url","protocols":[],"plans":[]}]}"#;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn cli(dir: &Path) -> Cli {
        let config = dir.join("storagecmp.json").to_string_lossy().to_string();
        Cli::parse_from(["storagecmp", "-q", "--config", &config, "check"])
    }

    #[tokio::test]
    async fn test_valid_content_passes() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/data/acme.json", VALID);

        assert!(run(&cli(dir.path())).await.is_ok());
    }

    #[tokio::test]
    async fn test_one_bad_file_fails_the_check() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/data/acme.json", VALID);
        write(dir.path(), "content/data/broken.json", BAD_URL);

        let err = run(&cli(dir.path())).await.unwrap_err();
        let store_err = err.downcast_ref::<StoreError>().unwrap();
        assert!(matches!(store_err, StoreError::InvalidContent { failed: 1, total: 2 }));
        assert!(store_err.is_content_error());
    }

    #[tokio::test]
    async fn test_no_matching_files_is_not_a_content_error() {
        let dir = TempDir::new().unwrap();

        let err = run(&cli(dir.path())).await.unwrap_err();
        let store_err = err.downcast_ref::<StoreError>().unwrap();
        assert!(matches!(store_err, StoreError::NoContent { .. }));
        assert!(!store_err.is_content_error());
    }
}
