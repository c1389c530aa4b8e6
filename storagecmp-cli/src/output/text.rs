//! Text output formatting with colors.

use std::path::Path;

use storagecmp_core::{BaseCost, Cost, Plan, Provider, ProviderCollection};
use storagecmp_store::{LoadReport, StoreError};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ========================================================================
    // Check Report
    // ========================================================================

    /// Formats a file that validated.
    pub fn format_file_ok(&self, path: &Path, collection: &ProviderCollection) -> String {
        format!(
            "{} {}  {}",
            self.green("✓"),
            path.display(),
            self.dim(&format!(
                "({} providers, {} plans)",
                collection.len(),
                collection.plan_count()
            ))
        )
    }

    /// Formats a file that failed.
    pub fn format_file_error(&self, path: &Path, error: &StoreError) -> String {
        format!(
            "{} {}\n    {}",
            self.red("✗"),
            self.bold(&path.display().to_string()),
            self.red(&error_detail(error))
        )
    }

    /// Formats the closing line of a check.
    pub fn format_check_summary(&self, report: &LoadReport) -> String {
        let total = report.files.len();
        let failed = report.failure_count();
        if failed == 0 {
            self.green(&format!("All {total} files in {} are valid", report.collection))
        } else {
            self.red(&format!("{failed} of {total} files in {} are invalid", report.collection))
        }
    }

    // ========================================================================
    // Providers
    // ========================================================================

    /// Formats the providers table header.
    pub fn format_providers_header(&self) -> String {
        self.bold(&format!(
            "{:<24} {:<40} {:>5}  {}",
            "Provider", "URL", "Plans", "Protocols"
        ))
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, provider: &Provider) -> String {
        let protocols: Vec<&str> = provider.protocols.iter().map(|p| p.as_str()).collect();
        format!(
            "{:<24} {} {:>5}  {}",
            provider.name,
            self.cyan(&format!("{:<40}", provider.url.as_str())),
            provider.plans.len(),
            protocols.join(", ")
        )
    }

    // ========================================================================
    // Plans
    // ========================================================================

    /// Formats the plans table header.
    pub fn format_plans_header(&self) -> String {
        self.bold(&format!(
            "{:<24} {:<20} {:>10}  {}",
            "Provider", "Plan", "Storage", "Base cost"
        ))
    }

    /// Formats a single plan line.
    pub fn format_plan_line(&self, provider: &Provider, plan: &Plan) -> String {
        let mut line = format!(
            "{:<24} {:<20} {:>10}  {}",
            provider.name,
            plan.name,
            format_size(plan.storage.included),
            format_base_cost(&plan.base_cost)
        );
        if let Some(more) = &plan.storage.more {
            line.push_str(&self.dim(&format!(
                "  (+{} per {})",
                format_cost(&more.cost),
                format_size(more.per)
            )));
        }
        line
    }

    // ========================================================================
    // Styling
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

// ============================================================================
// Value Formatting
// ============================================================================

/// Returns the part of an error worth showing under the file name.
pub fn error_detail(error: &StoreError) -> String {
    match error {
        StoreError::Invalid { source, .. } => source.to_string(),
        StoreError::Syntax { source, .. } => format!("invalid JSON: {source}"),
        StoreError::Read { source, .. } => format!("unreadable: {source}"),
        other => other.to_string(),
    }
}

/// Formats a size given in GB.
pub fn format_size(gb: f64) -> String {
    if gb >= 1000.0 {
        format!("{} TB", gb / 1000.0)
    } else {
        format!("{gb} GB")
    }
}

/// Formats one cost component, e.g. `3.81 EUR/mo incl. VAT`.
pub fn format_cost(cost: &Cost) -> String {
    let mut out = cost.value.to_string();
    if let Some(currency) = &cost.currency {
        out.push(' ');
        out.push_str(currency);
    }
    match cost.interval {
        None => {}
        Some(months) if (months - 1.0).abs() < f64::EPSILON => out.push_str("/mo"),
        Some(months) if (months - 12.0).abs() < f64::EPSILON => out.push_str("/yr"),
        Some(months) => out.push_str(&format!("/{months}mo")),
    }
    match cost.vat {
        Some(true) => out.push_str(" incl. VAT"),
        Some(false) => out.push_str(" excl. VAT"),
        None => {}
    }
    out
}

/// Formats a base cost, joining components with `+`.
pub fn format_base_cost(base: &BaseCost) -> String {
    base.components()
        .iter()
        .map(format_cost)
        .collect::<Vec<_>>()
        .join(" + ")
}
