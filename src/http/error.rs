//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::SchedulingError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (malformed parameters)
    BadRequest(String),
    /// Resource not found
    NotFound(String),
    /// Scheduling core rejection
    Scheduling(SchedulingError),
    /// Repository error outside the scheduling core
    Repository(RepositoryError),
}

fn scheduling_status(err: &SchedulingError) -> StatusCode {
    match err {
        SchedulingError::Structural(_) | SchedulingError::OutsideBusinessHours { .. } => {
            StatusCode::BAD_REQUEST
        }
        SchedulingError::SlotConflict { .. }
        | SchedulingError::CapacityExceeded { .. }
        | SchedulingError::InvalidTransition { .. } => StatusCode::CONFLICT,
        SchedulingError::ReservationNotFound(_) | SchedulingError::CustomerNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        SchedulingError::StorageUnavailable(e) => {
            if e.is_not_found() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::Scheduling(e) => {
                (scheduling_status(&e), ApiError::new(e.code(), e.to_string()))
            }
            AppError::Repository(e) => {
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
                } else {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        ApiError::new("STORAGE_UNAVAILABLE", e.to_string()),
                    )
                }
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        AppError::Scheduling(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
