//! HTTP API module for the Shift Engine.
//!
//! This module provides the REST endpoints for conflict checks, slot grids,
//! payroll and the completion sweep.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CompareMonthsRequest, ConflictCheckRequest, PayrollRequest, SlotGridRequest, SweepRequest,
};
pub use response::{ApiError, ApiErrorResponse, ConflictReport};
pub use state::AppState;
