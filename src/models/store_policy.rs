//! Store policy model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Severity;

/// Optional per-store scheduling caps.
///
/// Every cap is opt-in; a missing value disables the rule that depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePolicy {
    /// The store this policy applies to.
    pub store_id: String,
    /// Default capacity for fixed shifts without their own override.
    #[serde(default)]
    pub max_employees_per_shift: Option<u32>,
    /// Maximum approved/pending hours per employee per ISO week.
    #[serde(default)]
    pub max_hours_per_week: Option<Decimal>,
    /// Minimum days off per employee per calendar month.
    #[serde(default)]
    pub min_rest_days_per_month: Option<u32>,
    /// Minimum gap in hours between the end of one shift and the start of the next.
    #[serde(default)]
    pub min_rest_hours: Option<Decimal>,
    /// Severity used when the rest window is not respected.
    #[serde(default = "default_rest_severity")]
    pub rest_violation_severity: Severity,
}

fn default_rest_severity() -> Severity {
    Severity::Warning
}

impl StorePolicy {
    /// A policy with no caps configured.
    pub fn unrestricted(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            max_employees_per_shift: None,
            max_hours_per_week: None,
            min_rest_days_per_month: None,
            min_rest_hours: None,
            rest_violation_severity: default_rest_severity(),
        }
    }
}
