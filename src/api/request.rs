//! Request types for the Shift Engine API.
//!
//! Every request carries the snapshot it should be evaluated against; the
//! engine keeps no schedule data of its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::CandidateRequest;
use crate::models::{
    Employee, MonthlyPayroll, PayrollMonth, ScheduleRequest, ShiftDefinition, StorePolicy,
};

/// Request body for the `/conflicts` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    /// The request the employee is about to submit.
    pub candidate: CandidateRequest,
    /// The current calendar day; defaults to today's UTC date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Existing schedules for the store.
    #[serde(default)]
    pub schedules: Vec<ScheduleRequest>,
    /// The shift catalog.
    pub shifts: Vec<ShiftDefinition>,
    /// Store policy; the configured policy for the store is used when absent.
    #[serde(default)]
    pub policy: Option<StorePolicy>,
    /// ID of the existing request being edited, if any.
    #[serde(default)]
    pub editing_schedule_id: Option<String>,
}

/// Request body for the `/slots` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotGridRequest {
    /// The store to count slots for.
    pub store_id: String,
    /// The date to count slots for.
    pub date: NaiveDate,
    /// The shift catalog.
    pub shifts: Vec<ShiftDefinition>,
    /// Existing schedules for the store.
    #[serde(default)]
    pub schedules: Vec<ScheduleRequest>,
    /// Store policy; the configured policy for the store is used when absent.
    #[serde(default)]
    pub policy: Option<StorePolicy>,
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The month to compute, as `YYYY-MM`.
    pub month: PayrollMonth,
    /// The roster.
    pub employees: Vec<Employee>,
    /// Schedules to draw completed shifts from.
    #[serde(default)]
    pub schedules: Vec<ScheduleRequest>,
    /// The shift catalog.
    pub shifts: Vec<ShiftDefinition>,
}

/// Request body for the `/payroll/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareMonthsRequest {
    /// The month being reported.
    pub current: MonthlyPayroll,
    /// The month to compare against.
    pub previous: MonthlyPayroll,
}

/// Request body for the `/schedules/sweep` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    /// Cut-off date; approved schedules before it are completed.
    pub today: NaiveDate,
    /// The schedules to sweep.
    pub schedules: Vec<ScheduleRequest>,
    /// Batch size override; the configured size is used when absent.
    #[serde(default)]
    pub batch_size: Option<usize>,
}
