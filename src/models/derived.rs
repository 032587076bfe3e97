//! Attendance rows augmented with computed quantities.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::YearMonth;

/// An attendance record with its derived time and eligibility fields.
///
/// Produced by the derivation stage and completed by the join stage.
/// `adjusted_work_hours` is carried for reporting only. Aggregation sums
/// `delay_seconds` and `overtime_seconds`; the hour fields are their
/// decimal renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAttendanceRow {
    /// Employee name.
    pub employee: String,
    /// Department name.
    pub department: String,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Entry time.
    pub entry: NaiveTime,
    /// Exit time.
    pub exit: NaiveTime,
    /// Hours between entry and exit.
    pub work_hours: Decimal,
    /// Hours above the standard day, never negative.
    pub overtime: Decimal,
    /// Hours short of the standard day, never negative.
    pub delay: Decimal,
    /// Overtime in whole seconds.
    pub overtime_seconds: i64,
    /// Delay in whole seconds.
    pub delay_seconds: i64,
    /// Hours of approved permission on the same day, zero when none.
    pub permission_hours: Decimal,
    /// `work_hours` minus `permission_hours`.
    pub adjusted_work_hours: Decimal,
    /// Whether any holiday range covers the date.
    pub on_leave: bool,
    /// Whether the date is a Saturday or Sunday.
    pub is_weekend: bool,
    /// The month the record aggregates into.
    pub month: YearMonth,
}
