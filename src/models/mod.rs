//! Core data models for the Shift Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod conflict;
mod employee;
mod payroll;
mod schedule;
mod shift_definition;
mod slot;
mod store_policy;
mod time_range;

pub(crate) use schedule::effective_range;
pub(crate) use shift_definition::find_shift;

pub use conflict::{Conflict, ConflictRule, Severity, is_blocked};
pub use employee::Employee;
pub use payroll::{MonthComparison, MonthlyPayroll, PayrollLine, PayrollMonth};
pub use schedule::{ScheduleRequest, ScheduleStatus};
pub use shift_definition::{ShiftCategory, ShiftDefinition};
pub use slot::SlotAvailability;
pub use store_policy::StorePolicy;
pub use time_range::{ClockTime, MINUTES_PER_DAY, TimeRange};
