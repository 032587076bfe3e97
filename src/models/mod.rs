//! Core data models for the Attendance Metrics Engine.
//!
//! This module contains the raw feed payloads, the typed records parsed
//! from them, and the derived and aggregated rows produced by a run.

mod derived;
mod feed;
mod month;
mod records;
mod report;

pub use derived::DerivedAttendanceRow;
pub use feed::{FeedKind, FeedSnapshot, RawAttendanceRecord, RawHolidayRecord, RawPermissionRecord};
pub use month::{ParseYearMonthError, YearMonth};
pub use records::{
    AttendanceRecord, HolidayRecord, PermissionRecord, SECONDS_PER_HOUR, hours_from_seconds,
};
pub use report::{MetricsReport, MonthlyAggregateRow, RunStats};
