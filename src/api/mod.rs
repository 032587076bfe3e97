//! HTTP API module for the Attendance Metrics Engine.
//!
//! This module exposes the engine over HTTP: a full analytics run, the
//! chart series summary, and previews of the attendance and holiday feeds.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse, FeedPreview, PREVIEW_ROWS};
pub use state::AppState;
