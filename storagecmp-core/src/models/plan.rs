//! Plan and quota terms.
//!
//! Quantities of storage and traffic are in gigabytes.

use serde::Serialize;

use super::cost::{BaseCost, Cost, TrafficCost};

// ============================================================================
// Plan
// ============================================================================

/// A priced offering of a provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Plan name.
    pub name: String,
    /// Base fee, one or several components.
    pub base_cost: BaseCost,
    /// Included storage and overage.
    pub storage: StorageTerms,
    /// Combined ingress + egress allowance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_all: Option<TrafficTerms>,
    /// Outgoing traffic allowance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_egress: Option<TrafficTerms>,
    /// Incoming traffic allowance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_ingress: Option<TrafficTerms>,
}

impl Plan {
    /// Returns true if the plan states any traffic terms.
    pub fn has_traffic_terms(&self) -> bool {
        self.traffic_all.is_some()
            || self.traffic_egress.is_some()
            || self.traffic_ingress.is_some()
    }

    /// Returns egress included for the given amount of stored data.
    ///
    /// With a storage multiplier the allowance is `multiplier * stored_gb`
    /// and the flat `included` value is not consulted.
    pub fn included_egress(&self, stored_gb: f64) -> Option<f64> {
        let egress = self.traffic_egress.as_ref()?;
        Some(match egress.included_storage_multiplier {
            Some(factor) => factor * stored_gb,
            None => egress.included,
        })
    }
}

// ============================================================================
// Storage Terms
// ============================================================================

/// Storage included at base cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageTerms {
    /// Included storage in GB.
    pub included: f64,
    /// Price of storage beyond `included`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<OverageTerm>,
}

/// Price of additional storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverageTerm {
    /// Price of one unit.
    pub cost: Cost,
    /// Unit size in GB.
    pub per: f64,
}

// ============================================================================
// Traffic Terms
// ============================================================================

/// Which traffic field a [`TrafficTerms`] value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficKind {
    /// `trafficAll`
    All,
    /// `trafficEgress`
    Egress,
    /// `trafficIngress`
    Ingress,
}

impl TrafficKind {
    /// Returns the content field name.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::All => "trafficAll",
            Self::Egress => "trafficEgress",
            Self::Ingress => "trafficIngress",
        }
    }
}

/// Traffic allowance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficTerms {
    /// Included traffic in GB.
    pub included: f64,
    /// Included egress as a factor of stored data. Egress only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_storage_multiplier: Option<f64>,
    /// Price of traffic beyond `included`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<TrafficOverage>,
}

/// Price of additional traffic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficOverage {
    /// Price of one unit.
    pub cost: TrafficCost,
    /// Unit size in GB.
    pub per: f64,
}

// ============================================================================
// Tests
// ============================================================================
