//! Cost types.
//!
//! - [`Cost`] - Monetary amount with optional currency, interval and VAT flag
//! - [`TrafficCost`] - Narrower cost used for traffic overage
//! - [`BaseCost`] - One or several simultaneous billing components

use std::slice;

use serde::Serialize;

// ============================================================================
// Cost
// ============================================================================

/// A monetary amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cost {
    /// Amount, never negative.
    pub value: f64,
    /// Currency code (e.g. "EUR"). Not checked against ISO 4217.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Billing period in months.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    /// Whether `value` includes VAT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<bool>,
}

impl Cost {
    /// Creates a cost with only a value.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            currency: None,
            interval: None,
            vat: None,
        }
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Returns the amount normalized to one month.
    ///
    /// A missing interval is treated as monthly. A zero interval yields `None`.
    pub fn monthly_value(&self) -> Option<f64> {
        match self.interval {
            None => Some(self.value),
            Some(months) if months > 0.0 => Some(self.value / months),
            Some(_) => None,
        }
    }
}

// ============================================================================
// Traffic Cost
// ============================================================================

/// Cost of traffic overage.
///
/// Unlike [`Cost`] it has no interval or VAT flag, and the currency is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficCost {
    /// Amount, never negative.
    pub value: f64,
    /// Currency code.
    pub currency: String,
}

// ============================================================================
// Base Cost
// ============================================================================

/// Base fee of a plan.
///
/// Content may give either a bare cost object or an array of cost objects
/// (e.g. a base fee plus a per-tier fee); the variant records which one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BaseCost {
    /// A single cost object.
    Single(Cost),
    /// A non-empty array of cost components.
    Multiple(Vec<Cost>),
}

impl BaseCost {
    /// Returns all cost components.
    pub fn components(&self) -> &[Cost] {
        match self {
            Self::Single(cost) => slice::from_ref(cost),
            Self::Multiple(costs) => costs,
        }
    }

    /// Returns true if the content used the array form.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns the first component.
    pub fn primary(&self) -> Option<&Cost> {
        self.components().first()
    }

    /// Sums the monthly value of all components.
    ///
    /// Returns `None` if components use different currencies or one of them
    /// has a zero interval.
    pub fn monthly_total(&self) -> Option<f64> {
        let components = self.components();
        let currency = components.first()?.currency.as_deref();
        if components.iter().any(|c| c.currency.as_deref() != currency) {
            return None;
        }
        components.iter().map(Cost::monthly_value).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
