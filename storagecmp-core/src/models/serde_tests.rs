//! Serialization tests for content types.
//!
//! Validated records must serialize back to the content format: same member
//! names, optional members omitted when absent, base cost in the form it was
//! written in.

use serde_json::{json, Value};

use crate::{
    validate, BaseCost, Cost, Plan, Protocol, Provider, ProviderCollection, ProviderUrl,
    StorageTerms, TrafficCost, TrafficOverage, TrafficTerms,
};

fn sample_plan() -> Plan {
    Plan {
        name: "Basic".to_string(),
        base_cost: BaseCost::Single(Cost::new(5.0).with_currency("USD")),
        storage: StorageTerms {
            included: 100.0,
            more: None,
        },
        traffic_all: None,
        traffic_egress: None,
        traffic_ingress: None,
    }
}

// ============================================================================
// Field Names
// ============================================================================

#[test]
fn test_plan_uses_content_member_names() {
    let mut plan = sample_plan();
    plan.traffic_egress = Some(TrafficTerms {
        included: 0.0,
        included_storage_multiplier: Some(2.0),
        more: Some(TrafficOverage {
            cost: TrafficCost {
                value: 0.01,
                currency: "EUR".to_string(),
            },
            per: 1.0,
        }),
    });

    let value = serde_json::to_value(&plan).unwrap();
    let obj = value.as_object().unwrap();

    assert!(obj.contains_key("baseCost"));
    assert!(obj.contains_key("trafficEgress"));
    assert!(!obj.contains_key("trafficAll"));
    assert!(!obj.contains_key("trafficIngress"));
    assert_eq!(value["trafficEgress"]["includedStorageMultiplier"], json!(2.0));
    assert_eq!(value["trafficEgress"]["more"]["cost"]["currency"], json!("EUR"));
}

#[test]
fn test_absent_optionals_are_omitted() {
    let value = serde_json::to_value(Cost::new(1.5)).unwrap();
    assert_eq!(value, json!({"value": 1.5}));

    let value = serde_json::to_value(&sample_plan().storage).unwrap();
    assert_eq!(value, json!({"included": 100.0}));
}

// ============================================================================
// Base Cost
// ============================================================================

#[test]
fn test_base_cost_single_serializes_as_object() {
    let value = serde_json::to_value(BaseCost::Single(Cost::new(5.0))).unwrap();
    assert!(value.is_object());
}

#[test]
fn test_base_cost_multiple_serializes_as_array() {
    let base = BaseCost::Multiple(vec![Cost::new(1.0), Cost::new(2.0)]);
    let value = serde_json::to_value(base).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

// ============================================================================
// Provider
// ============================================================================

#[test]
fn test_provider_url_serializes_verbatim() {
    let provider = Provider {
        name: "Acme".to_string(),
        url: ProviderUrl::parse("https://acme.example").unwrap(),
        plans: vec![],
        protocols: vec![Protocol::Rsync, Protocol::WebDav],
    };

    let value = serde_json::to_value(&provider).unwrap();
    assert_eq!(value["url"], json!("https://acme.example"));
    assert_eq!(value["protocols"], json!(["rsync", "WebDAV"]));
}

#[test]
fn test_other_protocol_serializes_token() {
    let value = serde_json::to_value(Protocol::Other("NFS".to_string())).unwrap();
    assert_eq!(value, json!("NFS"));
}

// ============================================================================
// Re-validation Fidelity
// ============================================================================

#[test]
fn test_serialized_collection_revalidates_equal() {
    let doc = json!({
        "providers": [{
            "name": "Storage Box",
            "url": "https://storage.example/boxes",
            "protocols": ["SFTP", "SCP", "Samba", "rsync", "Borg", "WebDAV"],
            "plans": [
                {
                    "name": "BX11",
                    "baseCost": {"value": 3.81, "currency": "EUR", "interval": 1, "vat": true},
                    "storage": {"included": 1000},
                    "trafficAll": {"included": 0}
                },
                {
                    "name": "Object",
                    "baseCost": [
                        {"value": 4.99, "currency": "EUR"},
                        {"value": 0, "currency": "EUR", "interval": 12}
                    ],
                    "storage": {
                        "included": 1000,
                        "more": {"cost": {"value": 0.0067, "currency": "EUR"}, "per": 1}
                    },
                    "trafficEgress": {
                        "included": 1000,
                        "includedStorageMultiplier": 1,
                        "more": {"cost": {"value": 0.001, "currency": "EUR"}, "per": 1}
                    },
                    "trafficIngress": {"included": 0}
                }
            ]
        }]
    });

    let first = validate(&doc).unwrap();
    let reserialized: Value = serde_json::to_value(&first).unwrap();
    let second = validate(&reserialized).unwrap();

    assert_eq!(first, second);
    assert!(second.providers[0].plans[1].base_cost.is_multiple());
    assert_eq!(reserialized["providers"][0]["url"], json!("https://storage.example/boxes"));
}

#[test]
fn test_empty_collection_serializes() {
    let value = serde_json::to_value(ProviderCollection::default()).unwrap();
    assert_eq!(value, json!({"providers": []}));
}
