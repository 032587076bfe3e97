//! Response types for the Attendance Metrics API.
//!
//! This module defines the error response structures, the preview bodies,
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of rows returned by the preview endpoints.
pub const PREVIEW_ROWS: usize = 5;

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }
}

/// The first rows of a parsed feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPreview<T> {
    /// Rows in the feed.
    pub total_rows: usize,
    /// Up to [`PREVIEW_ROWS`] parsed rows.
    pub rows: Vec<T>,
}

impl<T> FeedPreview<T> {
    /// Keeps the first [`PREVIEW_ROWS`] of `rows`.
    pub fn head(mut rows: Vec<T>) -> Self {
        let total_rows = rows.len();
        rows.truncate(PREVIEW_ROWS);
        Self { total_rows, rows }
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
            EngineError::MalformedField {
                feed, row, field, ..
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MALFORMED_FIELD",
                    message,
                    format!("Check field '{}' of {} row {}", field, feed, row),
                ),
            },
            EngineError::JoinAmbiguity { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "JOIN_AMBIGUITY",
                    message,
                    "The permission feed contains duplicate rows for the same day",
                ),
            },
            EngineError::InvalidTierTable { .. }
            | EngineError::InvalidStandardDay { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
        }
    }
}
