//! Fine and bonus tier classification.
//!
//! A summed value earns the rate of the highest tier whose threshold it
//! strictly exceeds, or zero when it exceeds none. Monthly totals are
//! compared in whole seconds against thresholds scaled from hours.

use rust_decimal::Decimal;

use crate::config::TierTable;
use crate::models::{MonthlyAggregateRow, SECONDS_PER_HOUR};

use super::aggregation::MonthlyTotals;

/// Selects the rate of the highest tier whose threshold `value` exceeds.
///
/// # Examples
///
/// ```
/// use attendance_metrics::calculation::select_tier_rate;
/// use attendance_metrics::config::TierTable;
/// use rust_decimal::Decimal;
///
/// let table = TierTable::standard();
/// assert_eq!(select_tier_rate(Decimal::new(3, 0), &table), Decimal::ZERO);
/// assert_eq!(select_tier_rate(Decimal::new(12, 0), &table), Decimal::new(3, 2));
/// assert_eq!(select_tier_rate(Decimal::new(25, 0), &table), Decimal::new(5, 2));
/// ```
pub fn select_tier_rate(value: Decimal, table: &TierTable) -> Decimal {
    table
        .tiers()
        .iter()
        .rev()
        .find(|tier| value > tier.threshold)
        .map(|tier| tier.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Selects the rate of the highest tier whose threshold `seconds` exceeds.
///
/// Thresholds are in hours and are scaled to seconds before comparing, so
/// a total of exactly a threshold never selects that tier.
///
/// # Examples
///
/// ```
/// use attendance_metrics::calculation::select_tier_rate_for_seconds;
/// use attendance_metrics::config::TierTable;
/// use rust_decimal::Decimal;
///
/// let table = TierTable::standard();
/// assert_eq!(select_tier_rate_for_seconds(10_800, &table), Decimal::ZERO);
/// assert_eq!(select_tier_rate_for_seconds(10_801, &table), Decimal::new(2, 2));
/// ```
pub fn select_tier_rate_for_seconds(seconds: i64, table: &TierTable) -> Decimal {
    let value = Decimal::from(seconds);
    let per_hour = Decimal::from(SECONDS_PER_HOUR);
    table
        .tiers()
        .iter()
        .rev()
        .find(|tier| tier.threshold.checked_mul(per_hour).is_some_and(|limit| value > limit))
        .map(|tier| tier.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Assigns the fine (from delay) and bonus (from overtime) of one group.
pub fn classify_totals(
    totals: MonthlyTotals,
    fine_tiers: &TierTable,
    bonus_tiers: &TierTable,
) -> MonthlyAggregateRow {
    MonthlyAggregateRow {
        fine: select_tier_rate_for_seconds(totals.delay_seconds, fine_tiers),
        bonus: select_tier_rate_for_seconds(totals.overtime_seconds, bonus_tiers),
        delay: totals.delay(),
        overtime: totals.overtime(),
        delay_seconds: totals.delay_seconds,
        overtime_seconds: totals.overtime_seconds,
        employee: totals.employee,
        department: totals.department,
        month: totals.month,
    }
}
