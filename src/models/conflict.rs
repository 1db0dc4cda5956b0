//! Conflict model.
//!
//! A [`Conflict`] is a business-rule finding produced by the conflict detector.
//! Conflicts are never persisted and never raised as errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a conflict is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Surfaced to the user but does not block submission.
    Warning,
    /// Blocks submission.
    Error,
}

/// The rule that produced a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictRule {
    /// Overlapping shifts for the same employee on the same day.
    DoubleBooking,
    /// Too little rest between two of the employee's shifts.
    RestPeriod,
    /// The ISO-week hour cap would be exceeded.
    WeeklyHours,
    /// The fixed shift has no free slot left.
    Capacity,
    /// The requested date has already passed.
    PastDate,
    /// The employee already has a pending request for the date.
    PendingRequest,
    /// The month would be left with too few rest days.
    MonthlyRestDays,
}

impl fmt::Display for ConflictRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictRule::DoubleBooking => "double_booking",
            ConflictRule::RestPeriod => "rest_period",
            ConflictRule::WeeklyHours => "weekly_hours",
            ConflictRule::Capacity => "capacity",
            ConflictRule::PastDate => "past_date",
            ConflictRule::PendingRequest => "pending_request",
            ConflictRule::MonthlyRestDays => "monthly_rest_days",
        };
        f.write_str(name)
    }
}

/// A detected rule violation or warning for a candidate schedule request.
///
/// # Example
///
/// ```
/// use shift_engine::models::{Conflict, ConflictRule, Severity};
///
/// let conflict = Conflict::error(ConflictRule::PastDate, "2026-01-01 is in the past");
/// assert!(conflict.is_blocking());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The rule that fired.
    pub rule: ConflictRule,
    /// Whether the conflict blocks submission.
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
}

impl Conflict {
    /// Creates a conflict with the given severity.
    pub fn new(rule: ConflictRule, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
        }
    }

    /// Creates a blocking conflict.
    pub fn error(rule: ConflictRule, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Error, message)
    }

    /// Creates a non-blocking conflict.
    pub fn warning(rule: ConflictRule, message: impl Into<String>) -> Self {
        Self::new(rule, Severity::Warning, message)
    }

    /// Returns true if this conflict blocks submission.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Returns true if any conflict in the set blocks submission.
///
/// # Example
///
/// ```
/// use shift_engine::models::{is_blocked, Conflict, ConflictRule};
///
/// let warnings = vec![Conflict::warning(ConflictRule::RestPeriod, "short rest")];
/// assert!(!is_blocked(&warnings));
/// assert!(!is_blocked(&[]));
/// ```
pub fn is_blocked(conflicts: &[Conflict]) -> bool {
    conflicts.iter().any(Conflict::is_blocking)
}
