//! Slot capacity accounting.
//!
//! Counts how many registration slots remain for a store, fixed shift and
//! date. Capacity comes from the shift's own override, then the store policy,
//! and is unlimited when neither is configured.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{ScheduleRequest, ShiftDefinition, SlotAvailability, StorePolicy};

/// Resolves the capacity of a shift.
///
/// Flexible shifts are capacity-exempt and always unlimited.
pub fn shift_capacity(shift: &ShiftDefinition, policy: Option<&StorePolicy>) -> Option<u32> {
    if shift.is_flexible() {
        return None;
    }
    shift
        .capacity
        .or_else(|| policy.and_then(|p| p.max_employees_per_shift))
}

/// Computes the remaining slots for one store, shift and date.
///
/// Only `pending` and `approved` requests for exactly the same store, shift
/// and date occupy a slot.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_engine::calculation::available_slots;
/// use shift_engine::models::{ShiftCategory, ShiftDefinition};
///
/// let shift = ShiftDefinition {
///     id: "shift_open".to_string(),
///     name: "Open".to_string(),
///     start_time: "07:00".parse().unwrap(),
///     end_time: "15:00".parse().unwrap(),
///     duration: None,
///     category: ShiftCategory::FullTime,
///     is_active: true,
///     capacity: Some(3),
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
///
/// let slot = available_slots("store_001", date, &shift, None, &[]);
/// assert_eq!(slot.total, Some(3));
/// assert_eq!(slot.occupied, 0);
/// assert_eq!(slot.available, Some(3));
/// ```
pub fn available_slots(
    store_id: &str,
    date: NaiveDate,
    shift: &ShiftDefinition,
    policy: Option<&StorePolicy>,
    schedules: &[ScheduleRequest],
) -> SlotAvailability {
    let total = shift_capacity(shift, policy);
    let occupied = schedules
        .iter()
        .filter(|s| {
            s.store_id == store_id
                && s.shift_id == shift.id
                && s.date == date
                && s.status.occupies_slot()
        })
        .count() as u32;
    let available = total.map(|total| total.saturating_sub(occupied));

    debug!(
        store_id,
        shift_id = %shift.id,
        %date,
        ?total,
        occupied,
        "Counted shift slots"
    );

    SlotAvailability {
        shift_id: shift.id.clone(),
        date,
        store_id: store_id.to_string(),
        total,
        occupied,
        available,
    }
}

/// Computes availability for every active fixed shift on a date.
///
/// Flexible and inactive shifts are left out of the grid; flexible shifts are
/// only checked for time overlap by the conflict detector.
pub fn slot_grid(
    store_id: &str,
    date: NaiveDate,
    shifts: &[ShiftDefinition],
    policy: Option<&StorePolicy>,
    schedules: &[ScheduleRequest],
) -> Vec<SlotAvailability> {
    shifts
        .iter()
        .filter(|shift| shift.is_active && !shift.is_flexible())
        .map(|shift| available_slots(store_id, date, shift, policy, schedules))
        .collect()
}
