//! Shift definition model.
//!
//! A shift definition is a named template (e.g. "Open", "Night") that schedule
//! requests reference by ID.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TimeRange;
use super::time_range::ClockTime;

/// Whether a shift has fixed hours or lets the employee choose them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftCategory {
    /// Fixed hours that compete for a capacity-limited slot pool.
    FullTime,
    /// Flexible hours; the request may carry its own custom time range.
    PartTime,
}

/// A shift template defined by store administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Unique identifier for the shift.
    pub id: String,
    /// Display name of the shift.
    pub name: String,
    /// The fixed start time.
    pub start_time: ClockTime,
    /// The fixed end time. May be at or before `start_time` for overnight shifts.
    pub end_time: ClockTime,
    /// Nominal length in hours. Informational only; durations are always
    /// derived from the clock times.
    #[serde(default)]
    pub duration: Option<Decimal>,
    /// Fixed or flexible.
    pub category: ShiftCategory,
    /// Inactive shifts are hidden from the slot grid.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Per-shift capacity override, taking precedence over the store default.
    #[serde(default)]
    pub capacity: Option<u32>,
}

fn default_active() -> bool {
    true
}

impl ShiftDefinition {
    /// The shift's fixed time range.
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Returns true for part-time shifts with employee-chosen hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_engine::models::{ShiftCategory, ShiftDefinition};
    ///
    /// let shift = ShiftDefinition {
    ///     id: "shift_flex".to_string(),
    ///     name: "Flexible".to_string(),
    ///     start_time: "09:00".parse().unwrap(),
    ///     end_time: "22:00".parse().unwrap(),
    ///     duration: None,
    ///     category: ShiftCategory::PartTime,
    ///     is_active: true,
    ///     capacity: None,
    /// };
    /// assert!(shift.is_flexible());
    /// ```
    pub fn is_flexible(&self) -> bool {
        self.category == ShiftCategory::PartTime
    }
}

/// Looks up a shift by ID in a catalog slice.
pub(crate) fn find_shift<'a>(shifts: &'a [ShiftDefinition], id: &str) -> Option<&'a ShiftDefinition> {
    shifts.iter().find(|shift| shift.id == id)
}
