//! Calculation logic for the Shift Engine.
//!
//! This module contains the pure computations of the engine: time-interval
//! arithmetic with night-premium splitting, slot capacity accounting,
//! conflict detection for candidate schedule requests, monthly payroll
//! aggregation, and completion sweep planning. None of them perform I/O.

mod completion_sweep;
mod conflict_detection;
mod payroll;
mod slot_capacity;
mod time_interval;

pub use completion_sweep::{
    CompletionSweepPlan, DEFAULT_SWEEP_BATCH_SIZE, apply_completion_batch, plan_completion_sweep,
};
pub use conflict_detection::{CandidateRequest, ConflictContext, evaluate_conflicts};
pub use payroll::{
    NIGHT_PREMIUM_RATE, compare_months, compute_employee_payroll, compute_monthly_payroll,
};
pub use slot_capacity::{available_slots, shift_capacity, slot_grid};
pub use time_interval::{
    NIGHT_PREMIUM_WINDOWS, duration_hours, night_premium_hours, overlap_minutes,
    parse_duration_hours, parse_night_premium_hours, ranges_overlap,
};
