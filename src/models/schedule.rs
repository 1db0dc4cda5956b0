//! Schedule request model and its lifecycle.
//!
//! A schedule request ties an employee to a shift on a calendar date. Requests
//! start `pending`, are approved or rejected by a manager, and approved
//! requests are marked `completed` by the completion sweep once their date has
//! passed.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::shift_definition::find_shift;
use super::time_range::ClockTime;
use super::{ShiftDefinition, TimeRange};

/// Lifecycle status of a schedule request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Waiting for a manager decision.
    Pending,
    /// Accepted by a manager.
    Approved,
    /// Declined by a manager.
    Rejected,
    /// Worked; eligible for payroll.
    Completed,
}

impl ScheduleStatus {
    /// Returns true if the lifecycle allows moving from `self` to `next`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_engine::models::ScheduleStatus;
    ///
    /// assert!(ScheduleStatus::Pending.can_transition_to(ScheduleStatus::Approved));
    /// assert!(ScheduleStatus::Approved.can_transition_to(ScheduleStatus::Completed));
    /// assert!(!ScheduleStatus::Pending.can_transition_to(ScheduleStatus::Completed));
    /// assert!(!ScheduleStatus::Rejected.can_transition_to(ScheduleStatus::Approved));
    /// ```
    pub fn can_transition_to(self, next: ScheduleStatus) -> bool {
        matches!(
            (self, next),
            (ScheduleStatus::Pending, ScheduleStatus::Approved)
                | (ScheduleStatus::Pending, ScheduleStatus::Rejected)
                | (ScheduleStatus::Approved, ScheduleStatus::Completed)
        )
    }

    /// Returns true if a request in this status holds a slot.
    pub fn occupies_slot(self) -> bool {
        matches!(self, ScheduleStatus::Pending | ScheduleStatus::Approved)
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::Approved => "approved",
            ScheduleStatus::Rejected => "rejected",
            ScheduleStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// A request for an employee to work a shift on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The store the shift belongs to.
    pub store_id: String,
    /// The employee who will work the shift.
    pub employee_id: String,
    /// The referenced shift definition.
    pub shift_id: String,
    /// The calendar day the shift starts on.
    pub date: NaiveDate,
    /// Current lifecycle status.
    pub status: ScheduleStatus,
    /// Custom start time, honoured only for flexible shifts.
    #[serde(default)]
    pub start_time: Option<ClockTime>,
    /// Custom end time, honoured only for flexible shifts.
    #[serde(default)]
    pub end_time: Option<ClockTime>,
    /// Who asked for the shift.
    pub requested_by: String,
    /// Who created the record.
    pub created_by: String,
    /// Manager who assigned the shift, if any.
    #[serde(default)]
    pub assigned_by: Option<String>,
    /// Manager who approved the shift, if any.
    #[serde(default)]
    pub approved_by: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ScheduleRequest {
    /// Resolves the time range this request actually covers.
    ///
    /// Custom times apply only when the shift is flexible; otherwise the
    /// shift's fixed times are used. Supplying just one custom bound on a
    /// flexible shift is rejected.
    pub fn effective_range(&self, shift: &ShiftDefinition) -> EngineResult<TimeRange> {
        effective_range(&self.id, shift, self.start_time, self.end_time)
    }

    /// Looks up the request's shift in `shifts` and resolves its effective range.
    pub fn resolve_range(&self, shifts: &[ShiftDefinition]) -> EngineResult<TimeRange> {
        let shift = find_shift(shifts, &self.shift_id).ok_or_else(|| {
            EngineError::ShiftNotFound {
                shift_id: self.shift_id.clone(),
            }
        })?;
        self.effective_range(shift)
    }

    /// Moves the request to `next`, stamping `updated_at`.
    ///
    /// Re-applying `completed` to a completed request is a no-op; every other
    /// transition outside the lifecycle is rejected.
    pub fn transition(&mut self, next: ScheduleStatus, at: DateTime<Utc>) -> EngineResult<bool> {
        if self.status == ScheduleStatus::Completed && next == ScheduleStatus::Completed {
            return Ok(false);
        }
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                schedule_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Some(at);
        Ok(true)
    }
}

/// Picks custom or fixed times for a schedule or candidate request.
pub(crate) fn effective_range(
    schedule_id: &str,
    shift: &ShiftDefinition,
    start: Option<ClockTime>,
    end: Option<ClockTime>,
) -> EngineResult<TimeRange> {
    if !shift.is_flexible() {
        return Ok(shift.time_range());
    }
    match (start, end) {
        (Some(start), Some(end)) => Ok(TimeRange::new(start, end)),
        (None, None) => Ok(shift.time_range()),
        _ => Err(EngineError::InvalidSchedule {
            schedule_id: schedule_id.to_string(),
            message: "custom start and end times must be given together".to_string(),
        }),
    }
}
