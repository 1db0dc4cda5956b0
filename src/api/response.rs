//! Response types for the Shift Engine API.
//!
//! This module defines the success payloads that are not plain domain models
//! and the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Conflict, is_blocked};

/// Response body for the `/conflicts` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Every finding, blocking or not.
    pub conflicts: Vec<Conflict>,
    /// True if any finding has error severity.
    pub blocked: bool,
}

impl From<Vec<Conflict>> for ConflictReport {
    fn from(conflicts: Vec<Conflict>) -> Self {
        Self {
            blocked: is_blocked(&conflicts),
            conflicts,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::InvalidTime { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_TIME", message),
            },
            EngineError::InvalidDate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DATE", message),
            },
            EngineError::ShiftNotFound { shift_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "SHIFT_NOT_FOUND",
                    message,
                    format!("The shift '{}' is not in the supplied shift catalog", shift_id),
                ),
            },
            EngineError::InvalidSchedule { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_SCHEDULE", message),
            },
            EngineError::InvalidTransition { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_TRANSITION", message),
            },
            EngineError::InvalidBatchSize { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            EngineError::ArithmeticOverflow { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("ARITHMETIC_OVERFLOW", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConflictRule;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_shift_not_found_maps_to_bad_request() {
        let engine_error = EngineError::ShiftNotFound {
            shift_id: "ghost".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "SHIFT_NOT_FOUND");
        assert!(api_error.error.details.unwrap().contains("ghost"));
    }

    #[test]
    fn test_config_error_maps_to_server_error() {
        let engine_error = EngineError::ConfigNotFound {
            path: "/missing".to_string(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_report_blocked_flag() {
        let report: ConflictReport =
            vec![Conflict::warning(ConflictRule::RestPeriod, "short rest")].into();
        assert!(!report.blocked);

        let report: ConflictReport = vec![Conflict::error(ConflictRule::PastDate, "past")].into();
        assert!(report.blocked);
    }
}
