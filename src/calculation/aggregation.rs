//! Monthly aggregation.
//!
//! Surviving rows are grouped by (employee, department, month) and their
//! delay and overtime summed in whole seconds. Keys are compared exactly,
//! without any case or whitespace normalization.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DerivedAttendanceRow, YearMonth, hours_from_seconds};

/// Summed delay and overtime for one group, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Employee name.
    pub employee: String,
    /// Department name.
    pub department: String,
    /// The aggregated month.
    pub month: YearMonth,
    /// Sum of member delay in seconds.
    pub delay_seconds: i64,
    /// Sum of member overtime in seconds.
    pub overtime_seconds: i64,
    /// Number of rows in the group.
    pub days: usize,
}

impl MonthlyTotals {
    /// Summed delay in hours.
    pub fn delay(&self) -> Decimal {
        hours_from_seconds(self.delay_seconds)
    }

    /// Summed overtime in hours.
    pub fn overtime(&self) -> Decimal {
        hours_from_seconds(self.overtime_seconds)
    }
}

/// Groups rows by (employee, department, month) and sums delay and overtime.
///
/// The result is ordered by employee, then department, then month. An
/// empty input yields an empty result.
///
/// # Example
///
/// ```
/// use attendance_metrics::calculation::aggregate_monthly;
///
/// assert!(aggregate_monthly(&[]).is_empty());
/// ```
pub fn aggregate_monthly(rows: &[DerivedAttendanceRow]) -> Vec<MonthlyTotals> {
    let mut groups: BTreeMap<(&str, &str, YearMonth), MonthlyTotals> = BTreeMap::new();

    for row in rows {
        let totals = groups
            .entry((row.employee.as_str(), row.department.as_str(), row.month))
            .or_insert_with(|| MonthlyTotals {
                employee: row.employee.clone(),
                department: row.department.clone(),
                month: row.month,
                delay_seconds: 0,
                overtime_seconds: 0,
                days: 0,
            });
        totals.delay_seconds += row.delay_seconds;
        totals.overtime_seconds += row.overtime_seconds;
        totals.days += 1;
    }

    groups.into_values().collect()
}
