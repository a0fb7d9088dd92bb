//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracker_core::ValidationErrorCode;

/// Body of a successful record request; serializes as `{}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecordResponse {}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sweeper_running: bool,
    pub tracked_keys: usize,
    /// Events held as of the last sweep
    pub live_events: u64,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }

    pub fn empty_key() -> Self {
        Self::with_code(
            StatusCode::PRECONDITION_FAILED,
            ValidationErrorCode::EmptyKey.code(),
            "Invalid activity used as path parameter",
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_001", msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<tracker_core::Error> for ApiError {
    fn from(err: tracker_core::Error) -> Self {
        match err {
            tracker_core::Error::ValidationWithCode {
                code,
                message,
                http_status,
            } => {
                let status =
                    StatusCode::from_u16(http_status).unwrap_or(StatusCode::BAD_REQUEST);
                ApiError::with_code(status, code, message)
            }
            err @ tracker_core::Error::Config(_) => ApiError::internal(err.to_string()),
        }
    }
}
