//! Conflict detection for candidate schedule requests.
//!
//! Every rule runs independently against the same snapshot and the findings
//! are unioned. A candidate is blocked iff at least one finding has
//! [`Severity::Error`](crate::models::Severity::Error).
//!
//! | Rule | Severity | Needs policy |
//! |------|----------|--------------|
//! | double booking | error | no |
//! | rest period | policy-defined | `min_rest_hours` |
//! | weekly hours | error | `max_hours_per_week` |
//! | capacity (fixed shifts) | error | no |
//! | past date | error | no |
//! | pending request | error | no |
//! | monthly rest days | warning | `min_rest_days_per_month` |

use std::borrow::Cow;
use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClockTime, Conflict, ConflictRule, MINUTES_PER_DAY, PayrollMonth, ScheduleRequest,
    ScheduleStatus, ShiftDefinition, StorePolicy, TimeRange, effective_range, find_shift,
};

use super::slot_capacity::available_slots;
use super::time_interval::{duration_hours, ranges_overlap};

/// A schedule request that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRequest {
    /// The employee asking for the shift.
    pub employee_id: String,
    /// The store the shift belongs to.
    pub store_id: String,
    /// The requested shift definition.
    pub shift_id: String,
    /// The requested calendar date.
    pub date: NaiveDate,
    /// Custom start time for flexible shifts.
    #[serde(default)]
    pub start_time: Option<ClockTime>,
    /// Custom end time for flexible shifts.
    #[serde(default)]
    pub end_time: Option<ClockTime>,
}

/// The snapshot a candidate is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ConflictContext<'a> {
    /// The current calendar day.
    pub today: NaiveDate,
    /// Existing schedule requests.
    pub schedules: &'a [ScheduleRequest],
    /// The shift catalog.
    pub shifts: &'a [ShiftDefinition],
    /// The store's policy, if it has one.
    pub policy: Option<&'a StorePolicy>,
    /// ID of an existing request being edited; it is ignored by every rule.
    pub editing_schedule_id: Option<&'a str>,
}

/// An existing schedule of the candidate's employee with its resolved range.
struct Booked<'a> {
    schedule: &'a ScheduleRequest,
    range: TimeRange,
}

/// Evaluates every rule for a candidate and returns the findings.
///
/// Returns an error only for malformed input: an unknown shift ID (on the
/// candidate or on an existing schedule a rule needs to resolve) or a
/// half-specified custom range. Rule violations are returned as data.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_engine::calculation::{CandidateRequest, ConflictContext, evaluate_conflicts};
/// use shift_engine::models::{ConflictRule, ShiftCategory, ShiftDefinition, is_blocked};
///
/// let shifts = vec![ShiftDefinition {
///     id: "shift_open".to_string(),
///     name: "Open".to_string(),
///     start_time: "07:00".parse().unwrap(),
///     end_time: "15:00".parse().unwrap(),
///     duration: None,
///     category: ShiftCategory::FullTime,
///     is_active: true,
///     capacity: None,
/// }];
/// let candidate = CandidateRequest {
///     employee_id: "emp_001".to_string(),
///     store_id: "store_001".to_string(),
///     shift_id: "shift_open".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
///     start_time: None,
///     end_time: None,
/// };
/// let context = ConflictContext {
///     today: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     schedules: &[],
///     shifts: &shifts,
///     policy: None,
///     editing_schedule_id: None,
/// };
///
/// let conflicts = evaluate_conflicts(&candidate, &context).unwrap();
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].rule, ConflictRule::PastDate);
/// assert!(is_blocked(&conflicts));
/// ```
pub fn evaluate_conflicts(
    candidate: &CandidateRequest,
    context: &ConflictContext<'_>,
) -> EngineResult<Vec<Conflict>> {
    let shift = find_shift(context.shifts, &candidate.shift_id).ok_or_else(|| {
        EngineError::ShiftNotFound {
            shift_id: candidate.shift_id.clone(),
        }
    })?;
    let range = effective_range("candidate", shift, candidate.start_time, candidate.end_time)?;

    // The employee's live schedules, minus the one being edited.
    let own: Vec<&ScheduleRequest> = context
        .schedules
        .iter()
        .filter(|s| {
            s.employee_id == candidate.employee_id
                && s.status != ScheduleStatus::Rejected
                && Some(s.id.as_str()) != context.editing_schedule_id
        })
        .collect();

    let mut conflicts = Vec::new();
    check_double_booking(candidate, range, &own, context.shifts, &mut conflicts)?;
    if let Some(policy) = context.policy {
        check_rest_period(candidate, range, &own, context.shifts, policy, &mut conflicts)?;
        check_weekly_hours(candidate, range, &own, context.shifts, policy, &mut conflicts)?;
        check_monthly_rest_days(candidate, &own, policy, &mut conflicts)?;
    }
    check_capacity(candidate, shift, context, &mut conflicts);
    check_past_date(candidate, context.today, &mut conflicts);
    check_pending_request(candidate, &own, &mut conflicts);

    debug!(
        employee_id = %candidate.employee_id,
        shift_id = %candidate.shift_id,
        date = %candidate.date,
        range = %range,
        conflicts = conflicts.len(),
        "Evaluated schedule candidate"
    );

    Ok(conflicts)
}

/// Resolves the ranges of the schedules matching `keep`.
fn resolve<'a>(
    own: &[&'a ScheduleRequest],
    shifts: &[ShiftDefinition],
    keep: impl Fn(&ScheduleRequest) -> bool,
) -> EngineResult<Vec<Booked<'a>>> {
    own.iter()
        .copied()
        .filter(|s| keep(*s))
        .map(|schedule| {
            Ok(Booked {
                schedule,
                range: schedule.resolve_range(shifts)?,
            })
        })
        .collect()
}

/// Start and end of a shift in minutes on a continuous axis across dates.
fn absolute_span(date: NaiveDate, range: TimeRange) -> (i64, i64) {
    let day = i64::from(date.num_days_from_ce()) * i64::from(MINUTES_PER_DAY);
    let (start, end) = range.span_minutes();
    (day + i64::from(start), day + i64::from(end))
}

fn check_double_booking(
    candidate: &CandidateRequest,
    range: TimeRange,
    own: &[&ScheduleRequest],
    shifts: &[ShiftDefinition],
    conflicts: &mut Vec<Conflict>,
) -> EngineResult<()> {
    for booked in resolve(own, shifts, |s| s.date == candidate.date)? {
        if ranges_overlap(&range, &booked.range) {
            conflicts.push(Conflict::error(
                ConflictRule::DoubleBooking,
                format!(
                    "{} overlaps {} request '{}' ({}) on {}",
                    range, booked.schedule.status, booked.schedule.id, booked.range, candidate.date
                ),
            ));
        }
    }
    Ok(())
}

fn check_rest_period(
    candidate: &CandidateRequest,
    range: TimeRange,
    own: &[&ScheduleRequest],
    shifts: &[ShiftDefinition],
    policy: &StorePolicy,
    conflicts: &mut Vec<Conflict>,
) -> EngineResult<()> {
    let Some(min_rest_hours) = policy.min_rest_hours else {
        return Ok(());
    };
    // Saturate instead of failing on absurd policy values
    let min_rest = min_rest_hours
        .checked_mul(Decimal::from(60))
        .and_then(|minutes| minutes.round().to_i64())
        .unwrap_or(if min_rest_hours.is_sign_negative() { 0 } else { i64::MAX });
    // Shifts further apart than the rest window plus one shift length cannot violate it.
    let window_days = min_rest / i64::from(MINUTES_PER_DAY) + 2;

    let (start, end) = absolute_span(candidate.date, range);
    let nearby = resolve(own, shifts, |s| {
        (s.date - candidate.date).num_days().abs() <= window_days
    })?;

    for booked in nearby {
        if booked.schedule.date == candidate.date && ranges_overlap(&range, &booked.range) {
            continue;
        }
        let (other_start, other_end) = absolute_span(booked.schedule.date, booked.range);
        let gap = if other_start >= end {
            other_start - end
        } else if start >= other_end {
            start - other_end
        } else {
            0
        };
        if gap < min_rest {
            conflicts.push(Conflict::new(
                ConflictRule::RestPeriod,
                policy.rest_violation_severity,
                format!(
                    "only {}h rest between {} on {} and {} request '{}' ({}) on {}; {}h required",
                    (Decimal::from(gap) / Decimal::from(60)).round_dp(1),
                    range,
                    candidate.date,
                    booked.schedule.status,
                    booked.schedule.id,
                    booked.range,
                    booked.schedule.date,
                    min_rest_hours.normalize()
                ),
            ));
        }
    }
    Ok(())
}

fn check_weekly_hours(
    candidate: &CandidateRequest,
    range: TimeRange,
    own: &[&ScheduleRequest],
    shifts: &[ShiftDefinition],
    policy: &StorePolicy,
    conflicts: &mut Vec<Conflict>,
) -> EngineResult<()> {
    let Some(max_hours) = policy.max_hours_per_week else {
        return Ok(());
    };
    let week = candidate.date.iso_week();
    let same_week = resolve(own, shifts, |s| {
        s.status.occupies_slot() && s.date.iso_week() == week
    })?;

    let booked_hours: Decimal = same_week.iter().map(|b| duration_hours(&b.range)).sum();
    let total = booked_hours + duration_hours(&range);
    if total > max_hours {
        conflicts.push(Conflict::error(
            ConflictRule::WeeklyHours,
            format!(
                "{}h scheduled in ISO week {}-W{:02} would exceed the {}h weekly limit",
                total.normalize(),
                week.year(),
                week.week(),
                max_hours.normalize()
            ),
        ));
    }
    Ok(())
}

fn check_monthly_rest_days(
    candidate: &CandidateRequest,
    own: &[&ScheduleRequest],
    policy: &StorePolicy,
    conflicts: &mut Vec<Conflict>,
) -> EngineResult<()> {
    let Some(min_rest_days) = policy.min_rest_days_per_month else {
        return Ok(());
    };
    let month = PayrollMonth::containing(candidate.date);
    let mut worked: BTreeSet<NaiveDate> = own
        .iter()
        .map(|s| s.date)
        .filter(|date| month.contains(*date))
        .collect();
    worked.insert(candidate.date);

    let rest_days = month.days()?.saturating_sub(worked.len() as u32);
    if rest_days < min_rest_days {
        conflicts.push(Conflict::warning(
            ConflictRule::MonthlyRestDays,
            format!(
                "{} would leave {} rest days in {}; at least {} expected",
                candidate.date, rest_days, month, min_rest_days
            ),
        ));
    }
    Ok(())
}

fn check_capacity(
    candidate: &CandidateRequest,
    shift: &ShiftDefinition,
    context: &ConflictContext<'_>,
    conflicts: &mut Vec<Conflict>,
) {
    if shift.is_flexible() {
        return;
    }
    let pool: Cow<'_, [ScheduleRequest]> = match context.editing_schedule_id {
        Some(editing) => Cow::Owned(
            context
                .schedules
                .iter()
                .filter(|s| s.id != editing)
                .cloned()
                .collect(),
        ),
        None => Cow::Borrowed(context.schedules),
    };
    let slot = available_slots(
        &candidate.store_id,
        candidate.date,
        shift,
        context.policy,
        &pool,
    );
    if slot.is_full() {
        conflicts.push(Conflict::error(
            ConflictRule::Capacity,
            format!(
                "'{}' on {} is full ({} of {} slots taken)",
                shift.name,
                candidate.date,
                slot.occupied,
                slot.total.unwrap_or_default()
            ),
        ));
    }
}

fn check_past_date(candidate: &CandidateRequest, today: NaiveDate, conflicts: &mut Vec<Conflict>) {
    if candidate.date < today {
        conflicts.push(Conflict::error(
            ConflictRule::PastDate,
            format!("{} is before today ({})", candidate.date, today),
        ));
    }
}

fn check_pending_request(
    candidate: &CandidateRequest,
    own: &[&ScheduleRequest],
    conflicts: &mut Vec<Conflict>,
) {
    for schedule in own
        .iter()
        .filter(|s| s.date == candidate.date && s.status == ScheduleStatus::Pending)
    {
        conflicts.push(Conflict::error(
            ConflictRule::PendingRequest,
            format!(
                "pending request '{}' already exists for {}; edit it instead",
                schedule.id, candidate.date
            ),
        ));
    }
}
