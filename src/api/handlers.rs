//! HTTP request handlers for the Attendance Metrics API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{parse_attendance, parse_holidays, run_metrics};
use crate::error::EngineError;
use crate::models::FeedSnapshot;
use crate::report::summarize;

use super::response::{ApiError, ApiErrorResponse, FeedPreview};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analytics", post(analytics_handler))
        .route("/analytics/summary", post(summary_handler))
        .route("/attendance/preview", post(attendance_preview_handler))
        .route("/holiday/preview", post(holiday_preview_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Metrics run failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Extracts the feeds or produces the error response for a bad body.
fn extract_snapshot(
    correlation_id: Uuid,
    payload: Result<Json<FeedSnapshot>, JsonRejection>,
) -> Result<FeedSnapshot, Response> {
    match payload {
        Ok(Json(snapshot)) => Ok(snapshot),
        Err(rejection) => Err(rejection_response(correlation_id, rejection)),
    }
}

/// Handler for POST /analytics.
///
/// Runs the full pipeline and returns the [`crate::models::MetricsReport`].
async fn analytics_handler(
    State(state): State<AppState>,
    payload: Result<Json<FeedSnapshot>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analytics request");

    let snapshot = match extract_snapshot(correlation_id, payload) {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    match run_metrics(&snapshot, state.config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %report.run_id,
                monthly_groups = report.stats.monthly_groups,
                duration_us = report.stats.duration_us,
                "Analytics completed successfully"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /analytics/summary.
///
/// Runs the full pipeline and returns only the chart series.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<FeedSnapshot>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let snapshot = match extract_snapshot(correlation_id, payload) {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    match run_metrics(&snapshot, state.config()) {
        Ok(report) => json_response(StatusCode::OK, summarize(&report.monthly)),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /attendance/preview.
async fn attendance_preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<FeedSnapshot>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let snapshot = match extract_snapshot(correlation_id, payload) {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    match parse_attendance(&snapshot.attendance, state.config().formats()) {
        Ok(rows) => json_response(StatusCode::OK, FeedPreview::head(rows)),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /holiday/preview.
async fn holiday_preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<FeedSnapshot>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let snapshot = match extract_snapshot(correlation_id, payload) {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    match parse_holidays(&snapshot.holiday, state.config().formats()) {
        Ok(rows) => json_response(StatusCode::OK, FeedPreview::head(rows)),
        Err(err) => engine_error_response(correlation_id, err),
    }
}
