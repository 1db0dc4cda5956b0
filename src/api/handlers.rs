//! HTTP request handlers for the Shift Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    ConflictContext, compare_months, compute_monthly_payroll, evaluate_conflicts,
    plan_completion_sweep, slot_grid,
};
use crate::error::EngineError;

use super::request::{
    CompareMonthsRequest, ConflictCheckRequest, PayrollRequest, SlotGridRequest, SweepRequest,
};
use super::response::{ApiError, ApiErrorResponse, ConflictReport};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/conflicts", post(conflicts_handler))
        .route("/slots", post(slots_handler))
        .route("/payroll", post(payroll_handler))
        .route("/payroll/compare", post(compare_handler))
        .route("/schedules/sweep", post(sweep_handler))
        .with_state(state)
}

/// Serializes a success body with an explicit JSON content type.
fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Clock times and months fail inside serde with the engine's own message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else if body_text.contains("Invalid time") {
                ApiError::new("INVALID_TIME", body_text)
            } else if body_text.contains("Invalid date") {
                ApiError::new("INVALID_DATE", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Logs an engine error and maps it to its HTTP response.
fn engine_error_response(correlation_id: Uuid, err: EngineError, operation: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        operation,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Handler for POST /conflicts.
///
/// Evaluates every conflict rule for a candidate request against the supplied
/// snapshot and reports whether submission is blocked.
async fn conflicts_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConflictCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing conflict check");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let policy = state.resolve_policy(&request.candidate.store_id, request.policy.as_ref());
    let context = ConflictContext {
        today,
        schedules: &request.schedules,
        shifts: &request.shifts,
        policy,
        editing_schedule_id: request.editing_schedule_id.as_deref(),
    };

    let start_time = Instant::now();
    match evaluate_conflicts(&request.candidate, &context) {
        Ok(conflicts) => {
            let report = ConflictReport::from(conflicts);
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.candidate.employee_id,
                shift_id = %request.candidate.shift_id,
                date = %request.candidate.date,
                conflicts = report.conflicts.len(),
                blocked = report.blocked,
                policy_applied = policy.is_some(),
                duration_us = start_time.elapsed().as_micros(),
                "Conflict check completed"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => engine_error_response(correlation_id, err, "conflicts"),
    }
}

/// Handler for POST /slots.
///
/// Returns capacity for every active fixed shift on the requested date.
async fn slots_handler(
    State(state): State<AppState>,
    payload: Result<Json<SlotGridRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing slot grid request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let policy = state.resolve_policy(&request.store_id, request.policy.as_ref());
    let grid = slot_grid(
        &request.store_id,
        request.date,
        &request.shifts,
        policy,
        &request.schedules,
    );

    info!(
        correlation_id = %correlation_id,
        store_id = %request.store_id,
        date = %request.date,
        shifts = grid.len(),
        full = grid.iter().filter(|slot| slot.is_full()).count(),
        "Slot grid computed"
    );
    json_response(StatusCode::OK, grid)
}

/// Handler for POST /payroll.
///
/// Computes the monthly payroll for a roster from its completed schedules.
async fn payroll_handler(payload: Result<Json<PayrollRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_monthly_payroll(
        &request.employees,
        &request.schedules,
        &request.shifts,
        request.month,
    ) {
        Ok(payroll) => {
            info!(
                correlation_id = %correlation_id,
                month = %payroll.month,
                employees = payroll.total_employees,
                completed_shifts = payroll.total_completed_shifts,
                total_salary = %payroll.total_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll computed"
            );
            json_response(StatusCode::OK, payroll)
        }
        Err(err) => engine_error_response(correlation_id, err, "payroll"),
    }
}

/// Handler for POST /payroll/compare.
async fn compare_handler(payload: Result<Json<CompareMonthsRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll comparison");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match compare_months(&request.current, &request.previous) {
        Ok(comparison) => {
            info!(
                correlation_id = %correlation_id,
                current = %request.current.month,
                previous = %request.previous.month,
                salary_change = %comparison.salary_change,
                "Payroll comparison completed"
            );
            json_response(StatusCode::OK, comparison)
        }
        Err(err) => engine_error_response(correlation_id, err, "payroll_compare"),
    }
}

/// Handler for POST /schedules/sweep.
///
/// Plans which approved schedules should move to completed, in batches.
async fn sweep_handler(
    State(state): State<AppState>,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing completion sweep");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let batch_size = request
        .batch_size
        .unwrap_or(state.config().settings().sweep_batch_size);

    match plan_completion_sweep(&request.schedules, request.today, batch_size) {
        Ok(plan) => {
            info!(
                correlation_id = %correlation_id,
                today = %plan.today,
                total = plan.total,
                batches = plan.batches.len(),
                "Completion sweep planned"
            );
            json_response(StatusCode::OK, plan)
        }
        Err(err) => engine_error_response(correlation_id, err, "sweep"),
    }
}
