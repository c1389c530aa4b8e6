//! JSON output formatting.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use storagecmp_core::{Plan, Protocol, Provider, ValidationError};
use storagecmp_store::{relative_path, FileOutcome, LoadReport, StoreError};

use super::text::error_detail;

// ============================================================================
// Output Types
// ============================================================================

/// Check report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    pub collection: String,
    pub valid: bool,
    pub total: usize,
    pub failed: usize,
    pub files: Vec<FileOutput>,
}

/// Result for one content file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutput {
    pub path: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

/// Why a file failed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    /// One of `schema`, `format`, `syntax`, `read`, `other`.
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

/// Provider summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoOutput<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub protocols: &'a [Protocol],
    pub plans: usize,
}

/// A plan flattened with the provider columns of the comparison table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutput<'a> {
    pub provider_name: &'a str,
    pub provider_url: &'a str,
    pub protocols: &'a [Protocol],
    #[serde(flatten)]
    pub plan: &'a Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_base_cost: Option<f64>,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a check report; paths are shown relative to `root`.
    pub fn format_report(&self, report: &LoadReport, root: &Path) -> Result<String> {
        self.format(&report_to_output(report, root))
    }

    /// Formats a provider list.
    pub fn format_providers<'a>(
        &self,
        providers: impl IntoIterator<Item = &'a Provider>,
    ) -> Result<String> {
        let outputs: Vec<ProviderInfoOutput<'_>> = providers
            .into_iter()
            .map(|p| ProviderInfoOutput {
                name: &p.name,
                url: p.url.as_str(),
                protocols: &p.protocols,
                plans: p.plans.len(),
            })
            .collect();
        self.format(&outputs)
    }

    /// Formats a plan list.
    pub fn format_plans<'a>(
        &self,
        plans: impl IntoIterator<Item = (&'a Provider, &'a Plan)>,
    ) -> Result<String> {
        let outputs: Vec<PlanOutput<'_>> = plans
            .into_iter()
            .map(|(provider, plan)| PlanOutput {
                provider_name: &provider.name,
                provider_url: provider.url.as_str(),
                protocols: &provider.protocols,
                plan,
                monthly_base_cost: plan.base_cost.monthly_total(),
            })
            .collect();
        self.format(&outputs)
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Converts a load report to output.
pub fn report_to_output(report: &LoadReport, root: &Path) -> CheckOutput {
    CheckOutput {
        collection: report.collection.clone(),
        valid: report.is_ok(),
        total: report.files.len(),
        failed: report.failure_count(),
        files: report.files.iter().map(|f| file_to_output(f, root)).collect(),
    }
}

fn file_to_output(file: &FileOutcome, root: &Path) -> FileOutput {
    let path = relative_path(&file.path, root).display().to_string();

    match &file.result {
        Ok(collection) => FileOutput {
            path,
            valid: true,
            providers: Some(collection.len()),
            plans: Some(collection.plan_count()),
            error: None,
        },
        Err(e) => FileOutput {
            path,
            valid: false,
            providers: None,
            plans: None,
            error: Some(error_to_output(e)),
        },
    }
}

fn error_to_output(error: &StoreError) -> ErrorOutput {
    let (kind, field) = match error {
        StoreError::Invalid { source, .. } => {
            let kind = match source {
                ValidationError::Schema { .. } => "schema",
                ValidationError::Format { .. } => "format",
            };
            (kind, Some(source.path().to_string()))
        }
        StoreError::Syntax { .. } => ("syntax", None),
        StoreError::Read { .. } => ("read", None),
        _ => ("other", None),
    };

    ErrorOutput {
        kind,
        field,
        message: error_detail(error),
    }
}
