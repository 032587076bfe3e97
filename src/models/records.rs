//! Typed feed records.
//!
//! These are produced by the feed parser and consumed by the derivation
//! and join stages. Times are time-of-day only; exit is always taken to be
//! on the same calendar day as entry.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of seconds in an hour.
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Signed whole seconds from `start` to `end` on the same day.
///
/// Negative when `end` is earlier than `start`.
fn seconds_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_seconds()
}

/// Converts whole seconds to hours.
///
/// The quotient is rounded at Decimal precision when it does not terminate,
/// so hours produced here are for reporting. Sums and comparisons are done
/// on the seconds.
///
/// # Examples
///
/// ```
/// use attendance_metrics::models::hours_from_seconds;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_from_seconds(5400), Decimal::new(15, 1));
/// assert_eq!(hours_from_seconds(10_800), Decimal::new(3, 0));
/// ```
pub fn hours_from_seconds(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// One employee's entry and exit for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Employee name.
    pub employee: String,
    /// Department name.
    pub department: String,
    /// The calendar day of the swipe pair.
    pub date: NaiveDate,
    /// Entry time.
    pub entry: NaiveTime,
    /// Exit time, same day as entry.
    pub exit: NaiveTime,
}

impl AttendanceRecord {
    /// Hours between entry and exit, unclamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_metrics::models::AttendanceRecord;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     employee: "Alice".to_string(),
    ///     department: "Sales".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
    ///     entry: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    ///     exit: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
    /// };
    /// assert_eq!(record.work_hours(), Decimal::new(75, 1)); // 7.5 hours
    /// ```
    pub fn work_hours(&self) -> Decimal {
        hours_from_seconds(self.work_seconds())
    }

    /// Seconds between entry and exit, unclamped.
    pub fn work_seconds(&self) -> i64 {
        seconds_between(self.entry, self.exit)
    }

    /// Returns true if the record falls on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// An inclusive range of non-working days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range, inclusive.
    pub end: NaiveDate,
    /// When set, only rows of this department are covered.
    #[serde(default)]
    pub department: Option<String>,
}

impl HolidayRecord {
    /// Checks whether the range covers `date` for the given department.
    ///
    /// Both ends are inclusive. A reversed range (end before start)
    /// covers nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_metrics::models::HolidayRecord;
    /// use chrono::NaiveDate;
    ///
    /// let holiday = HolidayRecord {
    ///     start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    ///     end: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
    ///     department: None,
    /// };
    /// assert!(holiday.covers(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(), "Sales"));
    /// assert!(!holiday.covers(NaiveDate::from_ymd_opt(2024, 1, 13).unwrap(), "Sales"));
    /// ```
    pub fn covers(&self, date: NaiveDate, department: &str) -> bool {
        let in_range = self.start <= date && date <= self.end;
        let in_scope = self
            .department
            .as_deref()
            .is_none_or(|scoped| scoped == department);
        in_range && in_scope
    }
}

/// An approved partial-day absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    /// The day the permission applies to.
    pub date: NaiveDate,
    /// Department name.
    pub department: String,
    /// Employee name.
    pub employee: String,
    /// Start of the absence.
    pub start: NaiveTime,
    /// End of the absence.
    pub end: NaiveTime,
}

impl PermissionRecord {
    /// Hours between start and end, unclamped.
    pub fn permission_hours(&self) -> Decimal {
        hours_from_seconds(self.permission_seconds())
    }

    /// Seconds between start and end, unclamped.
    pub fn permission_seconds(&self) -> i64 {
        seconds_between(self.start, self.end)
    }
}
