//! Provider plan schema validation.
//!
//! [`validate`] turns one raw JSON document into a typed
//! [`ProviderCollection`] or the first [`ValidationError`] found. Objects are
//! checked member by member in declaration order, then for unknown members;
//! arrays are checked in document order.
//!
//! Validation is a pure function of its input: no I/O, no shared state.

mod reader;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormatError, JsonType, SchemaError, ValidationError};
use crate::models::{
    BaseCost, Cost, OverageTerm, Plan, Protocol, Provider, ProviderCollection, ProviderUrl,
    StorageTerms, TrafficCost, TrafficKind, TrafficOverage, TrafficTerms,
};
use crate::path::FieldPath;

use reader::{each, expect_array, expect_bool, expect_quantity, expect_str, expect_text, Object};

// ============================================================================
// Options
// ============================================================================

/// What to do with members the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Fail with [`SchemaError::UnknownField`].
    #[default]
    Reject,
    /// Skip them; they do not appear in the typed result.
    Ignore,
}

/// How protocol tokens are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolPolicy {
    /// Only the known protocols are accepted.
    #[default]
    Strict,
    /// Any string is accepted; unknown tokens become [`Protocol::Other`].
    Open,
}

/// Validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Unknown member handling.
    pub unknown_fields: UnknownFieldPolicy,
    /// Protocol token handling.
    pub protocols: ProtocolPolicy,
}

impl ValidationOptions {
    /// Returns the most permissive options, matching the loose legacy schema.
    pub fn lenient() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            protocols: ProtocolPolicy::Open,
        }
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Validates a document with the default (strict) options.
pub fn validate(raw: &Value) -> Result<ProviderCollection, ValidationError> {
    validate_with(raw, &ValidationOptions::default())
}

/// Validates a document with explicit options.
pub fn validate_with(
    raw: &Value,
    options: &ValidationOptions,
) -> Result<ProviderCollection, ValidationError> {
    Validator { options }.collection(raw)
}

impl TryFrom<&Value> for ProviderCollection {
    type Error = ValidationError;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        validate(raw)
    }
}

// ============================================================================
// Declared Members
// ============================================================================

const COLLECTION_FIELDS: &[&str] = &["providers"];
const PROVIDER_FIELDS: &[&str] = &["name", "url", "plans", "protocols"];
const PLAN_FIELDS: &[&str] = &[
    "name",
    "baseCost",
    "storage",
    "trafficAll",
    "trafficEgress",
    "trafficIngress",
];
const COST_FIELDS: &[&str] = &["value", "currency", "interval", "vat"];
const STORAGE_FIELDS: &[&str] = &["included", "more"];
const OVERAGE_FIELDS: &[&str] = &["cost", "per"];
const TRAFFIC_FIELDS: &[&str] = &["included", "more"];
const EGRESS_FIELDS: &[&str] = &["included", "includedStorageMultiplier", "more"];
const TRAFFIC_COST_FIELDS: &[&str] = &["value", "currency"];

// ============================================================================
// Validator
// ============================================================================

struct Validator<'o> {
    options: &'o ValidationOptions,
}

impl Validator<'_> {
    fn finish(&self, obj: &Object<'_>, declared: &[&str]) -> Result<(), ValidationError> {
        obj.check_unknown(declared, self.options.unknown_fields)
    }

    fn collection(&self, raw: &Value) -> Result<ProviderCollection, ValidationError> {
        let obj = Object::new(raw, FieldPath::root())?;

        let (value, path) = obj.required("providers")?;
        let providers = each(expect_array(value, &path)?, &path, |v, p| self.provider(v, p))?;

        self.finish(&obj, COLLECTION_FIELDS)?;
        Ok(ProviderCollection { providers })
    }

    fn provider(&self, value: &Value, path: FieldPath) -> Result<Provider, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("name")?;
        let name = expect_text(v, &p)?;

        let (v, p) = obj.required("url")?;
        let url = parse_url(v, &p)?;

        let (v, p) = obj.required("plans")?;
        let plans = each(expect_array(v, &p)?, &p, |v, p| self.plan(v, p))?;

        let (v, p) = obj.required("protocols")?;
        let protocols = each(expect_array(v, &p)?, &p, |v, p| self.protocol(v, &p))?;

        self.finish(&obj, PROVIDER_FIELDS)?;
        Ok(Provider {
            name,
            url,
            plans,
            protocols,
        })
    }

    fn protocol(&self, value: &Value, path: &FieldPath) -> Result<Protocol, ValidationError> {
        let token = expect_str(value, path)?;
        match (Protocol::known(token), self.options.protocols) {
            (Some(protocol), _) => Ok(protocol),
            (None, ProtocolPolicy::Open) => Ok(Protocol::Other(token.to_string())),
            (None, ProtocolPolicy::Strict) => Err(ValidationError::format(
                path.clone(),
                FormatError::UnknownProtocol(token.to_string()),
            )),
        }
    }

    fn plan(&self, value: &Value, path: FieldPath) -> Result<Plan, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("name")?;
        let name = expect_text(v, &p)?;

        let (v, p) = obj.required("baseCost")?;
        let base_cost = self.base_cost(v, p)?;

        let (v, p) = obj.required("storage")?;
        let storage = self.storage(v, p)?;

        let traffic_all = self.optional_traffic(&obj, TrafficKind::All)?;
        let traffic_egress = self.optional_traffic(&obj, TrafficKind::Egress)?;
        let traffic_ingress = self.optional_traffic(&obj, TrafficKind::Ingress)?;

        self.finish(&obj, PLAN_FIELDS)?;
        Ok(Plan {
            name,
            base_cost,
            storage,
            traffic_all,
            traffic_egress,
            traffic_ingress,
        })
    }

    fn base_cost(&self, value: &Value, path: FieldPath) -> Result<BaseCost, ValidationError> {
        match value {
            Value::Object(_) => Ok(BaseCost::Single(self.cost(value, path)?)),
            Value::Array(items) if items.is_empty() => {
                Err(ValidationError::format(path, FormatError::EmptyBaseCost))
            }
            Value::Array(items) => Ok(BaseCost::Multiple(each(items, &path, |v, p| {
                self.cost(v, p)
            })?)),
            other => Err(ValidationError::schema(
                path,
                SchemaError::InvalidBaseCost {
                    actual: JsonType::of(other),
                },
            )),
        }
    }

    fn cost(&self, value: &Value, path: FieldPath) -> Result<Cost, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("value")?;
        let amount = expect_quantity(v, &p)?;

        let currency = match obj.optional("currency") {
            Some((v, p)) => Some(expect_str(v, &p)?.to_string()),
            None => None,
        };
        let interval = match obj.optional("interval") {
            Some((v, p)) => Some(expect_quantity(v, &p)?),
            None => None,
        };
        let vat = match obj.optional("vat") {
            Some((v, p)) => Some(expect_bool(v, &p)?),
            None => None,
        };

        self.finish(&obj, COST_FIELDS)?;
        Ok(Cost {
            value: amount,
            currency,
            interval,
            vat,
        })
    }

    fn storage(&self, value: &Value, path: FieldPath) -> Result<StorageTerms, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("included")?;
        let included = expect_quantity(v, &p)?;

        let more = match obj.optional("more") {
            Some((v, p)) => Some(self.overage(v, p)?),
            None => None,
        };

        self.finish(&obj, STORAGE_FIELDS)?;
        Ok(StorageTerms { included, more })
    }

    fn overage(&self, value: &Value, path: FieldPath) -> Result<OverageTerm, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("cost")?;
        let cost = self.cost(v, p)?;

        let (v, p) = obj.required("per")?;
        let per = expect_quantity(v, &p)?;

        self.finish(&obj, OVERAGE_FIELDS)?;
        Ok(OverageTerm { cost, per })
    }

    fn optional_traffic(
        &self,
        plan: &Object<'_>,
        kind: TrafficKind,
    ) -> Result<Option<TrafficTerms>, ValidationError> {
        match plan.optional(kind.field_name()) {
            Some((v, p)) => Ok(Some(self.traffic(v, p, kind)?)),
            None => Ok(None),
        }
    }

    fn traffic(
        &self,
        value: &Value,
        path: FieldPath,
        kind: TrafficKind,
    ) -> Result<TrafficTerms, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("included")?;
        let included = expect_quantity(v, &p)?;

        // Only egress may scale with stored data.
        let included_storage_multiplier = match (kind, obj.optional("includedStorageMultiplier")) {
            (TrafficKind::Egress, Some((v, p))) => Some(expect_quantity(v, &p)?),
            _ => None,
        };

        let more = match obj.optional("more") {
            Some((v, p)) => Some(self.traffic_overage(v, p)?),
            None => None,
        };

        let declared = match kind {
            TrafficKind::Egress => EGRESS_FIELDS,
            TrafficKind::All | TrafficKind::Ingress => TRAFFIC_FIELDS,
        };
        self.finish(&obj, declared)?;
        Ok(TrafficTerms {
            included,
            included_storage_multiplier,
            more,
        })
    }

    fn traffic_overage(
        &self,
        value: &Value,
        path: FieldPath,
    ) -> Result<TrafficOverage, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("cost")?;
        let cost = self.traffic_cost(v, p)?;

        let (v, p) = obj.required("per")?;
        let per = expect_quantity(v, &p)?;

        self.finish(&obj, OVERAGE_FIELDS)?;
        Ok(TrafficOverage { cost, per })
    }

    fn traffic_cost(&self, value: &Value, path: FieldPath) -> Result<TrafficCost, ValidationError> {
        let obj = Object::new(value, path)?;

        let (v, p) = obj.required("value")?;
        let amount = expect_quantity(v, &p)?;

        let (v, p) = obj.required("currency")?;
        let currency = expect_str(v, &p)?.to_string();

        self.finish(&obj, TRAFFIC_COST_FIELDS)?;
        Ok(TrafficCost {
            value: amount,
            currency,
        })
    }
}

fn parse_url(value: &Value, path: &FieldPath) -> Result<ProviderUrl, ValidationError> {
    let raw = expect_str(value, path)?;
    ProviderUrl::parse(raw).map_err(|e| {
        ValidationError::format(
            path.clone(),
            FormatError::InvalidUrl {
                value: raw.to_string(),
                reason: e.to_string(),
            },
        )
    })
}

// ============================================================================
// Tests
// ============================================================================
