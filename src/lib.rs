//! Shift scheduling and payroll engine for retail stores
//!
//! This crate decides whether an employee's shift request may be submitted
//! (double booking, rest periods, weekly hours, slot capacity, past dates and
//! pending requests), counts remaining slots per shift, and computes monthly
//! payroll with a night-shift premium from completed schedules.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
