//! Slot availability model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Remaining registration capacity for one store, shift and date.
///
/// `total` and `available` are `None` when the shift has no capacity limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    /// The shift being counted.
    pub shift_id: String,
    /// The calendar date being counted.
    pub date: NaiveDate,
    /// The store being counted.
    pub store_id: String,
    /// Configured capacity, or `None` for unlimited.
    pub total: Option<u32>,
    /// Pending and approved requests holding a slot.
    pub occupied: u32,
    /// Free slots, never negative; `None` for unlimited.
    pub available: Option<u32>,
}

impl SlotAvailability {
    /// Returns true if no slot is left.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use shift_engine::models::SlotAvailability;
    ///
    /// let slot = SlotAvailability {
    ///     shift_id: "shift_open".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
    ///     store_id: "store_001".to_string(),
    ///     total: Some(2),
    ///     occupied: 2,
    ///     available: Some(0),
    /// };
    /// assert!(slot.is_full());
    /// ```
    pub fn is_full(&self) -> bool {
        self.available == Some(0)
    }

    /// Returns true if the shift has no capacity limit.
    pub fn is_unlimited(&self) -> bool {
        self.total.is_none()
    }
}
