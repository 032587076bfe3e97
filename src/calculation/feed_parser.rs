//! Feed parsing.
//!
//! This module turns the raw string rows of the three feeds into typed
//! records. Values are matched against the configured chrono patterns
//! exactly as received; nothing is trimmed or coerced. The first value
//! that fails to match aborts the whole parse.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::FeedFormats;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, FeedKind, FeedSnapshot, HolidayRecord, PermissionRecord,
    RawAttendanceRecord, RawHolidayRecord, RawPermissionRecord,
};

/// The three feeds after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFeeds {
    /// Typed attendance rows, in feed order.
    pub attendance: Vec<AttendanceRecord>,
    /// Typed holiday ranges, in feed order.
    pub holidays: Vec<HolidayRecord>,
    /// Typed permission rows, in feed order.
    pub permissions: Vec<PermissionRecord>,
}

fn malformed(feed: FeedKind, row: usize, field: &str, value: &str, expected: &str) -> EngineError {
    EngineError::MalformedField {
        feed,
        row,
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

fn parse_date(
    feed: FeedKind,
    row: usize,
    field: &str,
    value: &str,
    format: &str,
) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value, format)
        .map_err(|_| malformed(feed, row, field, value, format))
}

fn parse_time(
    feed: FeedKind,
    row: usize,
    field: &str,
    value: &str,
    format: &str,
) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value, format)
        .map_err(|_| malformed(feed, row, field, value, format))
}

/// Parses the attendance feed.
///
/// `Date` uses the date format and `Entry`/`Exit` the attendance time
/// format (`HH:MM` by default).
///
/// # Example
///
/// ```
/// use attendance_metrics::calculation::parse_attendance;
/// use attendance_metrics::config::FeedFormats;
/// use attendance_metrics::models::RawAttendanceRecord;
///
/// let raw = vec![RawAttendanceRecord {
///     employee: "Alice".to_string(),
///     department: "Sales".to_string(),
///     date: "2024-01-09".to_string(),
///     entry: "09:00".to_string(),
///     exit: "18:00".to_string(),
/// }];
/// let parsed = parse_attendance(&raw, &FeedFormats::default()).unwrap();
/// assert_eq!(parsed[0].entry.to_string(), "09:00:00");
/// ```
pub fn parse_attendance(
    rows: &[RawAttendanceRecord],
    formats: &FeedFormats,
) -> EngineResult<Vec<AttendanceRecord>> {
    let feed = FeedKind::Attendance;
    rows.iter()
        .enumerate()
        .map(|(row, raw)| {
            Ok(AttendanceRecord {
                employee: raw.employee.clone(),
                department: raw.department.clone(),
                date: parse_date(feed, row, "Date", &raw.date, &formats.date)?,
                entry: parse_time(feed, row, "Entry", &raw.entry, &formats.attendance_time)?,
                exit: parse_time(feed, row, "Exit", &raw.exit, &formats.attendance_time)?,
            })
        })
        .collect()
}

/// Parses the holiday feed.
pub fn parse_holidays(
    rows: &[RawHolidayRecord],
    formats: &FeedFormats,
) -> EngineResult<Vec<HolidayRecord>> {
    let feed = FeedKind::Holiday;
    rows.iter()
        .enumerate()
        .map(|(row, raw)| {
            Ok(HolidayRecord {
                start: parse_date(feed, row, "Start", &raw.start, &formats.date)?,
                end: parse_date(feed, row, "End", &raw.end, &formats.date)?,
                department: raw.department.clone(),
            })
        })
        .collect()
}

/// Parses the permission feed.
///
/// `Start`/`End` use the permission time format (`HH:MM:SS` by default).
pub fn parse_permissions(
    rows: &[RawPermissionRecord],
    formats: &FeedFormats,
) -> EngineResult<Vec<PermissionRecord>> {
    let feed = FeedKind::Permission;
    rows.iter()
        .enumerate()
        .map(|(row, raw)| {
            Ok(PermissionRecord {
                date: parse_date(feed, row, "Date", &raw.date, &formats.date)?,
                department: raw.department.clone(),
                employee: raw.employee.clone(),
                start: parse_time(feed, row, "Start", &raw.start, &formats.permission_time)?,
                end: parse_time(feed, row, "End", &raw.end, &formats.permission_time)?,
            })
        })
        .collect()
}

/// Parses all three feeds of a snapshot.
///
/// Feeds are parsed in attendance, holiday, permission order, so an error
/// in the attendance feed is reported even if later feeds are also bad.
pub fn parse_feeds(snapshot: &FeedSnapshot, formats: &FeedFormats) -> EngineResult<ParsedFeeds> {
    Ok(ParsedFeeds {
        attendance: parse_attendance(&snapshot.attendance, formats)?,
        holidays: parse_holidays(&snapshot.holiday, formats)?,
        permissions: parse_permissions(&snapshot.permission, formats)?,
    })
}
