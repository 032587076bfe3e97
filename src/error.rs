//! Error types for the Attendance Metrics Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can abort a metrics run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::FeedKind;

/// The main error type for the Attendance Metrics Engine.
///
/// Every fallible operation in the engine returns this error type. A run
/// either completes in full or fails with one of these variants; no partial
/// report is ever produced.
///
/// # Example
///
/// ```
/// use attendance_metrics::error::EngineError;
/// use attendance_metrics::models::FeedKind;
///
/// let error = EngineError::MalformedField {
///     feed: FeedKind::Attendance,
///     row: 4,
///     field: "Entry".to_string(),
///     value: "9h".to_string(),
///     expected: "%H:%M".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Malformed field 'Entry' in attendance row 4: '9h' does not match '%H:%M'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A feed value did not match its expected date or time pattern.
    #[error("Malformed field '{field}' in {feed} row {row}: '{value}' does not match '{expected}'")]
    MalformedField {
        /// The feed the offending row belongs to.
        feed: FeedKind,
        /// Zero-based index of the row within its feed.
        row: usize,
        /// The field name as it appears in the feed.
        field: String,
        /// The raw value that failed to parse.
        value: String,
        /// The pattern the value was expected to match.
        expected: String,
    },

    /// More than one permission row shares the same join key and the
    /// configured policy rejects duplicates.
    #[error(
        "Ambiguous permission join for employee '{employee}' in '{department}' on {date}: {count} matching rows"
    )]
    JoinAmbiguity {
        /// The date of the duplicated key.
        date: NaiveDate,
        /// The department of the duplicated key.
        department: String,
        /// The employee of the duplicated key.
        employee: String,
        /// How many permission rows share the key.
        count: usize,
    },

    /// A fine or bonus tier table was not usable.
    #[error("Invalid {table} tier table: {message}")]
    InvalidTierTable {
        /// Which table was rejected ("fine" or "bonus").
        table: String,
        /// A description of the problem.
        message: String,
    },

    /// The standard working day is not a positive whole number of seconds.
    #[error("Invalid standard day of {hours} hours: must be positive and a whole number of seconds")]
    InvalidStandardDay {
        /// The configured length in hours.
        hours: Decimal,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
