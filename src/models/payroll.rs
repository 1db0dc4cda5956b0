//! Payroll result models.
//!
//! These are computed views over completed schedules and are never persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month, written `YYYY-MM`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use shift_engine::models::PayrollMonth;
///
/// let month: PayrollMonth = "2026-02".parse().unwrap();
/// assert_eq!(month.first_day().unwrap(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(month.last_day().unwrap(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayrollMonth {
    /// The year.
    pub year: i32,
    /// The month, 1 through 12.
    pub month: u32,
}

impl PayrollMonth {
    /// Creates a month, rejecting month numbers outside 1..=12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let candidate = Self { year, month };
        candidate.first_day()?;
        Ok(candidate)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The first day of the month.
    pub fn first_day(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| EngineError::InvalidDate {
            value: self.to_string(),
            message: "month is not representable".to_string(),
        })
    }

    /// The last day of the month.
    pub fn last_day(&self) -> EngineResult<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| EngineError::InvalidDate {
                value: self.to_string(),
                message: "month is not representable".to_string(),
            })
    }

    /// Number of days in the month.
    pub fn days(&self) -> EngineResult<u32> {
        Ok(self.last_day()?.day())
    }

    /// Returns true if `date` falls inside the month (inclusive of both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for PayrollMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidDate {
            value: s.to_string(),
            message: "expected YYYY-MM".to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for PayrollMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayrollMonth> for String {
    fn from(month: PayrollMonth) -> Self {
        month.to_string()
    }
}

impl fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One employee's pay for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The employee ID.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The hourly rate used.
    pub hourly_rate: Decimal,
    /// Number of completed shifts counted.
    pub completed_shifts: u32,
    /// Sum of worked hours.
    pub total_hours: Decimal,
    /// Hours falling inside the night-premium window.
    pub night_shift_hours: Decimal,
    /// Premium paid on top of base pay for night hours.
    pub night_shift_allowance: Decimal,
    /// `total_hours * hourly_rate + night_shift_allowance`.
    pub total_salary: Decimal,
}

/// Payroll for a whole roster for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayroll {
    /// The month covered.
    pub month: PayrollMonth,
    /// One line per rostered employee.
    pub lines: Vec<PayrollLine>,
    /// Number of employees on the roster.
    pub total_employees: u32,
    /// Completed shifts across the roster.
    pub total_completed_shifts: u32,
    /// Worked hours across the roster.
    pub total_hours: Decimal,
    /// Night-premium hours across the roster.
    pub total_night_shift_hours: Decimal,
    /// Night-premium allowance across the roster.
    pub total_night_shift_allowance: Decimal,
    /// Gross pay across the roster.
    pub total_salary: Decimal,
}

/// Month-over-month change in payroll totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthComparison {
    /// `current.total_salary - previous.total_salary`.
    pub salary_change: Decimal,
    /// Salary change in percent of the previous month; 0 if the previous month was 0.
    pub salary_change_percent: Decimal,
    /// `current.total_hours - previous.total_hours`.
    pub hours_change: Decimal,
    /// Hours change in percent of the previous month; 0 if the previous month was 0.
    pub hours_change_percent: Decimal,
}
