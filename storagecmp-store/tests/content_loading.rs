//! Integration tests for configuration-driven content loading.

use std::path::Path;

use storagecmp_core::Protocol;
use storagecmp_store::{Config, ContentLoader, ContentStore, StoreError, CONFIG_FILE_NAME};
use tempfile::TempDir;

const HETZNER: &str = r#"{
  "providers": [
    {
      "name": "Storage Box",
      "url": "https://www.hetzner.com/storage/storage-box",
      "protocols": ["SFTP", "SCP", "Samba", "rsync", "Borg", "WebDAV"],
      "plans": [
        {
          "name": "BX11",
          "baseCost": {"value": 3.81, "currency": "EUR", "interval": 1, "vat": true},
          "storage": {"included": 1000},
          "trafficAll": {"included": 0}
        }
      ]
    }
  ]
}"#;

const OBJECT_STORE: &str = r#"{
  "providers": [
    {
      "name": "Object Cloud",
      "url": "https://object.example",
      "protocols": ["S3"],
      "plans": [
        {
          "name": "Pay as you go",
          "baseCost": [{"value": 0, "currency": "USD"}],
          "storage": {"included": 0, "more": {"cost": {"value": 6, "currency": "USD"}, "per": 1000}},
          "trafficEgress": {"included": 0, "includedStorageMultiplier": 3}
        }
      ]
    }
  ]
}"#;

async fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(path, content).await.unwrap();
}

#[tokio::test]
async fn test_config_driven_load() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "site/data/hetzner.json", HETZNER).await;
    write(temp_dir.path(), "site/data/us/object.json", OBJECT_STORE).await;
    write(
        temp_dir.path(),
        CONFIG_FILE_NAME,
        r#"{"content": {"dir": "site"}}"#,
    )
    .await;

    let config = Config::load_from(&temp_dir.path().join(CONFIG_FILE_NAME))
        .await
        .unwrap();
    let store = ContentStore::new(ContentLoader::from_config(&config));
    let content = store.reload().await.unwrap();

    assert_eq!(content.collection, "storageProviders");
    assert_eq!(content.documents.len(), 2);
    assert_eq!(content.provider_count(), 2);
    assert_eq!(content.plan_count(), 2);

    let box_provider = content.provider("Storage Box").unwrap();
    assert!(box_provider.supports(&Protocol::Borg));

    let (_, plan) = content
        .plans()
        .find(|(p, _)| p.name == "Object Cloud")
        .unwrap();
    assert!(plan.base_cost.is_multiple());
    assert_eq!(plan.included_egress(100.0), Some(300.0));
}

#[tokio::test]
async fn test_malformed_provider_fails_build() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "content/data/ok.json", HETZNER).await;
    write(
        temp_dir.path(),
        "content/data/bad.json",
        &OBJECT_STORE.replace("https://object.example", "object.example"),
    )
    .await;

    let config = Config::load_from(&temp_dir.path().join(CONFIG_FILE_NAME))
        .await
        .unwrap();
    let loader = ContentLoader::from_config(&config);

    let report = loader.load().await.unwrap();
    assert_eq!(report.failure_count(), 1);

    let failure = report.failures().next().unwrap();
    let err = failure.result.as_ref().unwrap_err();
    assert!(err.is_content_error());
    assert_eq!(
        err.validation().unwrap().path().to_string(),
        "providers[0].url"
    );

    let err = loader.load_content().await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidContent { failed: 1, total: 2 }));
}
