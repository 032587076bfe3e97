//! Chart series computed from the monthly table.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{MonthlyAggregateRow, YearMonth, hours_from_seconds};

/// Per-employee totals across every month and department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSeries {
    /// Employee name.
    pub employee: String,
    /// Monthly rows contributing to the series.
    pub months: usize,
    /// Sum of monthly overtime.
    pub total_overtime: Decimal,
    /// Mean monthly overtime.
    pub average_overtime: Decimal,
    /// Sum of monthly delay.
    pub total_delay: Decimal,
    /// Sum of monthly fine rates.
    pub total_fine: Decimal,
    /// Sum of monthly bonus rates.
    pub total_bonus: Decimal,
}

/// Overtime and delay summed per department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTotals {
    /// Department name.
    pub department: String,
    /// Sum of monthly overtime.
    pub overtime: Decimal,
    /// Sum of monthly delay.
    pub delay: Decimal,
}

/// One monthly row plotted as overtime against delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Employee name, used as the series colour.
    pub employee: String,
    /// The month the point describes.
    pub month: YearMonth,
    /// Monthly overtime.
    pub overtime: Decimal,
    /// Monthly delay.
    pub delay: Decimal,
}

/// Every series the report emitter draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Ordered by employee name.
    pub employees: Vec<EmployeeSeries>,
    /// Ordered by department name.
    pub departments: Vec<DepartmentTotals>,
    /// In monthly table order.
    pub overtime_vs_delay: Vec<ScatterPoint>,
}

#[derive(Default)]
struct EmployeeTally {
    months: usize,
    overtime_seconds: i64,
    delay_seconds: i64,
    fine: Decimal,
    bonus: Decimal,
}

/// Builds the chart series from a monthly table.
///
/// Hour totals are summed in whole seconds and converted once.
///
/// # Example
///
/// ```
/// use attendance_metrics::report::summarize;
///
/// let summary = summarize(&[]);
/// assert!(summary.employees.is_empty());
/// ```
pub fn summarize(monthly: &[MonthlyAggregateRow]) -> ReportSummary {
    let mut employees: BTreeMap<&str, EmployeeTally> = BTreeMap::new();
    let mut departments: BTreeMap<&str, (i64, i64)> = BTreeMap::new();

    for row in monthly {
        let tally = employees.entry(row.employee.as_str()).or_default();
        tally.months += 1;
        tally.overtime_seconds += row.overtime_seconds;
        tally.delay_seconds += row.delay_seconds;
        tally.fine += row.fine;
        tally.bonus += row.bonus;

        let (overtime, delay) = departments.entry(row.department.as_str()).or_default();
        *overtime += row.overtime_seconds;
        *delay += row.delay_seconds;
    }

    let employees = employees
        .into_iter()
        .map(|(employee, tally)| EmployeeSeries {
            employee: employee.to_string(),
            months: tally.months,
            total_overtime: hours_from_seconds(tally.overtime_seconds),
            average_overtime: hours_from_seconds(tally.overtime_seconds)
                / Decimal::from(tally.months),
            total_delay: hours_from_seconds(tally.delay_seconds),
            total_fine: tally.fine,
            total_bonus: tally.bonus,
        })
        .collect();

    let departments = departments
        .into_iter()
        .map(|(department, (overtime, delay))| DepartmentTotals {
            department: department.to_string(),
            overtime: hours_from_seconds(overtime),
            delay: hours_from_seconds(delay),
        })
        .collect();

    ReportSummary {
        employees,
        departments,
        overtime_vs_delay: monthly
            .iter()
            .map(|row| ScatterPoint {
                employee: row.employee.clone(),
                month: row.month,
                overtime: row.overtime,
                delay: row.delay,
            })
            .collect(),
    }
}
