//! Raw feed payloads as delivered by the feed retrieval layer.
//!
//! Every field is carried as the string the producing system sent. The
//! feed parser turns these into the typed records in [`super::records`].

use serde::{Deserialize, Serialize};

/// Identifies one of the three input feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// Daily entry/exit swipes.
    Attendance,
    /// Approved holiday ranges.
    Holiday,
    /// Approved partial-day permissions.
    Permission,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Attendance => write!(f, "attendance"),
            FeedKind::Holiday => write!(f, "holiday"),
            FeedKind::Permission => write!(f, "permission"),
        }
    }
}

/// One unparsed attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAttendanceRecord {
    /// Employee name.
    #[serde(rename = "Employee")]
    pub employee: String,
    /// Department name.
    #[serde(rename = "Department")]
    pub department: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(rename = "Date")]
    pub date: String,
    /// Entry time, `HH:MM`.
    #[serde(rename = "Entry")]
    pub entry: String,
    /// Exit time, `HH:MM`.
    #[serde(rename = "Exit")]
    pub exit: String,
}

/// One unparsed holiday range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHolidayRecord {
    /// First day of the range, `YYYY-MM-DD`.
    #[serde(rename = "Start")]
    pub start: String,
    /// Last day of the range (inclusive), `YYYY-MM-DD`.
    #[serde(rename = "End")]
    pub end: String,
    /// Optional department scope. Absent means the range applies to everyone.
    #[serde(rename = "Department", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// One unparsed permission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPermissionRecord {
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(rename = "Date")]
    pub date: String,
    /// Department name.
    #[serde(rename = "Department")]
    pub department: String,
    /// Employee name.
    #[serde(rename = "Employee")]
    pub employee: String,
    /// Permission start, `HH:MM:SS`.
    #[serde(rename = "Start")]
    pub start: String,
    /// Permission end, `HH:MM:SS`.
    #[serde(rename = "End")]
    pub end: String,
}

/// A full pull of all three feeds, processed together as one run.
///
/// This is also the JSON body of every API endpoint. A feed that is left
/// out is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    /// Attendance rows.
    #[serde(default)]
    pub attendance: Vec<RawAttendanceRecord>,
    /// Holiday ranges.
    #[serde(default)]
    pub holiday: Vec<RawHolidayRecord>,
    /// Permission rows.
    #[serde(default)]
    pub permission: Vec<RawPermissionRecord>,
}
