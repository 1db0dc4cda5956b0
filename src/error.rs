//! Error types for the Shift Engine.
//!
//! This module provides strongly-typed validation errors using the `thiserror`
//! crate. Business-rule violations are not errors; they are reported as
//! [`Conflict`](crate::models::Conflict) values.

use thiserror::Error;

use crate::models::ScheduleStatus;

/// The main error type for the Shift Engine.
///
/// Every variant describes a caller contract violation (malformed input or an
/// unknown reference), never a business outcome.
///
/// # Example
///
/// ```
/// use shift_engine::error::EngineError;
///
/// let error = EngineError::ShiftNotFound {
///     shift_id: "shift_night".to_string(),
/// };
/// assert_eq!(error.to_string(), "Shift not found: shift_night");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A clock time did not match `HH:MM` or was out of range.
    #[error("Invalid time '{value}': {message}")]
    InvalidTime {
        /// The rejected input.
        value: String,
        /// Why the input was rejected.
        message: String,
    },

    /// A date or month could not be represented.
    #[error("Invalid date '{value}': {message}")]
    InvalidDate {
        /// The rejected input.
        value: String,
        /// Why the input was rejected.
        message: String,
    },

    /// A schedule referenced a shift that is not in the catalog.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The unknown shift ID.
        shift_id: String,
    },

    /// A schedule request was internally inconsistent.
    #[error("Invalid schedule '{schedule_id}': {message}")]
    InvalidSchedule {
        /// The ID of the offending schedule (or candidate).
        schedule_id: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// A status change that the schedule lifecycle does not allow.
    #[error("Schedule '{schedule_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        /// The ID of the schedule.
        schedule_id: String,
        /// The current status.
        from: ScheduleStatus,
        /// The requested status.
        to: ScheduleStatus,
    },

    /// A completion sweep was requested with an unusable batch size.
    #[error("Invalid batch size: {size}")]
    InvalidBatchSize {
        /// The rejected batch size.
        size: usize,
    },

    /// A decimal computation exceeded the representable range.
    #[error("Arithmetic overflow while computing {operation}")]
    ArithmeticOverflow {
        /// What was being computed.
        operation: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
