//! Result models for a metrics run.
//!
//! This module contains the [`MetricsReport`] envelope and the
//! [`MonthlyAggregateRow`] it carries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DerivedAttendanceRow, YearMonth};

/// One employee's summed metrics for one month in one department.
///
/// # Example
///
/// ```
/// use attendance_metrics::models::{MonthlyAggregateRow, YearMonth};
/// use rust_decimal::Decimal;
///
/// let row = MonthlyAggregateRow {
///     employee: "Alice".to_string(),
///     department: "Sales".to_string(),
///     month: "2024-01".parse::<YearMonth>().unwrap(),
///     delay: Decimal::new(12, 0),
///     overtime: Decimal::ZERO,
///     delay_seconds: 12 * 3600,
///     overtime_seconds: 0,
///     fine: Decimal::new(3, 2),
///     bonus: Decimal::ZERO,
/// };
/// assert_eq!(row.month.to_string(), "2024-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregateRow {
    /// Employee name.
    pub employee: String,
    /// Department name.
    pub department: String,
    /// The aggregated month.
    pub month: YearMonth,
    /// Sum of per-day delay hours.
    pub delay: Decimal,
    /// Sum of per-day overtime hours.
    pub overtime: Decimal,
    /// Summed delay in whole seconds.
    pub delay_seconds: i64,
    /// Summed overtime in whole seconds.
    pub overtime_seconds: i64,
    /// Fine rate selected from the fine tiers.
    pub fine: Decimal,
    /// Bonus rate selected from the bonus tiers.
    pub bonus: Decimal,
}

/// Row counts and timing for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Attendance rows received.
    pub attendance_rows: usize,
    /// Holiday ranges received.
    pub holiday_ranges: usize,
    /// Permission rows received.
    pub permission_rows: usize,
    /// Attendance rows matched to at least one permission row.
    pub permission_matches: usize,
    /// Attendance rows dropped because they fell on leave.
    pub excluded_on_leave: usize,
    /// Attendance rows that reached aggregation.
    pub surviving_rows: usize,
    /// Number of (employee, department, month) groups.
    pub monthly_groups: usize,
    /// Wall-clock duration of the run in microseconds.
    pub duration_us: u64,
}

/// The complete result of one metrics run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run completed.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// Monthly aggregates ordered by employee, department, month.
    pub monthly: Vec<MonthlyAggregateRow>,
    /// Surviving derived rows in feed order.
    pub records: Vec<DerivedAttendanceRow>,
    /// Counts and timing.
    pub stats: RunStats,
}

impl MetricsReport {
    /// Returns true when no attendance survived into the aggregate.
    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
    }
}
