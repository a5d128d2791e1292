//! Centralized error types for the Radiodial core library.
//!
//! This module provides a unified error handling system that:
//! - Defines structured error types using `thiserror`
//! - Maps errors to appropriate HTTP status codes
//! - Implements `IntoResponse` for automatic JSON error responses
//!
//! Metadata and artwork failures never reach this type: they are best-effort
//! enrichments and collapse to empty results where they happen.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// First validation failure for a station payload.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Human-readable reason.
    pub message: String,
    /// Dotted path of the offending field (empty for the body itself).
    pub field: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
        }
    }
}

/// Application-wide error type for the Radiodial server.
#[derive(Debug, Error)]
pub enum RadiodialError {
    /// No station carries the requested id.
    #[error("Station not found: {0}")]
    StationNotFound(String),

    /// Client sent a station payload that failed validation.
    #[error("Invalid station: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing the persisted catalog failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Server configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RadiodialError {
    /// Returns a machine-readable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StationNotFound(_) => "station_not_found",
            Self::Validation(_) => "invalid_request",
            Self::Storage(_) => "storage_error",
            Self::Internal(_) => "internal_error",
            Self::Configuration(_) => "configuration_error",
        }
    }

    /// Maps the error to an appropriate HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::StationNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenient Result alias for application-wide operations.
pub type RadiodialResult<T> = Result<T, RadiodialError>;

/// JSON response body for error responses.
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for RadiodialError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.code();
        let body = match self {
            Self::Validation(v) => ErrorResponse {
                error,
                message: v.message,
                field: Some(v.field),
            },
            Self::StationNotFound(_) => ErrorResponse {
                error,
                message: "Station not found".to_string(),
                field: None,
            },
            other => {
                // Details stay in the log; clients get a generic message.
                log::error!("[Server] Request failed: {}", other);
                ErrorResponse {
                    error,
                    message: "Internal server error".to_string(),
                    field: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
