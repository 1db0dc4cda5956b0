//! Employee model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee on a store roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pay per hour worked.
    pub hourly_rate: Decimal,
    /// Home store, if the roster spans several stores.
    #[serde(default)]
    pub store_id: Option<String>,
}
