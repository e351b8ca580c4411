//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in FoodHub                                │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<Json<T>, ApiError>                                              │
//! │         │                                                               │
//! │         ├── bad JSON / query ─────────► VALIDATION_ERROR    400         │
//! │         ├── ValidationError ──────────► VALIDATION_ERROR    400         │
//! │         ├── OrderError::NotFound ─────► NOT_FOUND           404         │
//! │         ├── OrderError::InvalidTransition ► INVALID_TRANSITION 409      │
//! │         ├── OrderError::Conflict ─────► CONFLICT            409         │
//! │         └── OrderError::Storage ──────► STORAGE_ERROR       503         │
//! │                                         (generic message, details      │
//! │                                          only in the server log)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "code": "INVALID_TRANSITION",
//!   "message": "Order 7 cannot move from PENDING to DELIVERED",
//!   "retryable": false
//! }
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use foodhub_core::{OrderError, ValidationError};

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Whether sending the same request again may succeed
    pub retryable: bool,

    /// Offending input field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Status change not allowed from the current status (409)
    InvalidTransition,

    /// Concurrent modification, retry (409)
    Conflict,

    /// Store unavailable or write failed (503)
    StorageError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidTransition | ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::StorageError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>, retryable: bool) -> Self {
        ApiError {
            code,
            message: message.into(),
            retryable,
            field: None,
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message, false)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts order errors to API errors.
impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        let retryable = err.is_retryable();
        match err {
            OrderError::Validation(e) => e.into(),
            OrderError::NotFound { .. } => {
                ApiError::new(ErrorCode::NotFound, err.to_string(), retryable)
            }
            OrderError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::InvalidTransition, err.to_string(), retryable)
            }
            OrderError::Conflict { .. } => {
                ApiError::new(ErrorCode::Conflict, err.to_string(), retryable)
            }
            OrderError::Storage(detail) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %detail, "Storage failure surfaced to client");
                ApiError::new(
                    ErrorCode::StorageError,
                    "The order store is unavailable, please retry",
                    retryable,
                )
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: err.to_string(),
            retryable: false,
            field: Some(err.field().to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}
