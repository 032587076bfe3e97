//! Per-record derivation of work hours, overtime and delay.
//!
//! Every attendance record is measured against the standard working day:
//! time above it counts as overtime, time short of it counts as delay.
//! Exactly one of the two is non-zero unless the day is exactly standard.
//! Durations are whole seconds; hours are only formed for output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::NegativeDurationPolicy;
use crate::models::{AttendanceRecord, PermissionRecord, hours_from_seconds};

/// The durations derived from one attendance record, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    /// Seconds between entry and exit, possibly negative.
    pub work_seconds: i64,
    /// `max(work_seconds - standard, 0)`.
    pub overtime_seconds: i64,
    /// `max(standard - work_seconds, 0)`.
    pub delay_seconds: i64,
}

impl DailyHours {
    /// Work time in hours.
    pub fn work_hours(&self) -> Decimal {
        hours_from_seconds(self.work_seconds)
    }

    /// Overtime in hours.
    pub fn overtime(&self) -> Decimal {
        hours_from_seconds(self.overtime_seconds)
    }

    /// Delay in hours.
    pub fn delay(&self) -> Decimal {
        hours_from_seconds(self.delay_seconds)
    }
}

fn apply_policy(seconds: i64, policy: NegativeDurationPolicy) -> i64 {
    match policy {
        NegativeDurationPolicy::Propagate => seconds,
        NegativeDurationPolicy::Clamp => seconds.max(0),
    }
}

/// Splits worked seconds into overtime and delay against a standard day.
///
/// # Examples
///
/// ```
/// use attendance_metrics::calculation::split_against_standard;
/// use rust_decimal::Decimal;
///
/// let hours = split_against_standard(27_000, 28_800);
/// assert_eq!(hours.overtime_seconds, 0);
/// assert_eq!(hours.delay_seconds, 1_800);
/// assert_eq!(hours.delay(), Decimal::new(5, 1));
/// ```
pub fn split_against_standard(work_seconds: i64, standard_seconds: i64) -> DailyHours {
    DailyHours {
        work_seconds,
        overtime_seconds: (work_seconds - standard_seconds).max(0),
        delay_seconds: (standard_seconds - work_seconds).max(0),
    }
}

/// Derives work time, overtime and delay for one attendance record.
///
/// Under [`NegativeDurationPolicy::Propagate`] an exit earlier than entry
/// gives negative work time, a delay above the standard day and zero
/// overtime.
///
/// # Examples
///
/// ```
/// use attendance_metrics::calculation::derive_daily_hours;
/// use attendance_metrics::config::{NegativeDurationPolicy, DEFAULT_STANDARD_DAILY_SECONDS};
/// use attendance_metrics::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord {
///     employee: "Alice".to_string(),
///     department: "Sales".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
///     entry: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     exit: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
/// };
/// let hours = derive_daily_hours(
///     &record,
///     DEFAULT_STANDARD_DAILY_SECONDS,
///     NegativeDurationPolicy::Propagate,
/// );
/// assert_eq!(hours.work_hours(), Decimal::new(9, 0));
/// assert_eq!(hours.overtime(), Decimal::new(1, 0));
/// assert_eq!(hours.delay_seconds, 0);
/// ```
pub fn derive_daily_hours(
    record: &AttendanceRecord,
    standard_seconds: i64,
    policy: NegativeDurationPolicy,
) -> DailyHours {
    let work_seconds = apply_policy(record.work_seconds(), policy);
    split_against_standard(work_seconds, standard_seconds)
}

/// Derives the permission seconds of one permission record.
pub fn derive_permission_seconds(record: &PermissionRecord, policy: NegativeDurationPolicy) -> i64 {
    apply_policy(record.permission_seconds(), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STANDARD_DAILY_SECONDS;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(entry: &str, exit: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee: "Alice".to_string(),
            department: "Sales".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            entry: NaiveTime::parse_from_str(entry, "%H:%M").unwrap(),
            exit: NaiveTime::parse_from_str(exit, "%H:%M").unwrap(),
        }
    }

    fn derive(entry: &str, exit: &str) -> DailyHours {
        derive_daily_hours(
            &record(entry, exit),
            DEFAULT_STANDARD_DAILY_SECONDS,
            NegativeDurationPolicy::Propagate,
        )
    }

    #[test]
    fn test_nine_hour_day_has_one_hour_overtime() {
        let hours = derive("09:00", "18:00");
        assert_eq!(hours.work_hours(), dec("9.0"));
        assert_eq!(hours.overtime(), dec("1.0"));
        assert_eq!(hours.delay(), Decimal::ZERO);
    }

    #[test]
    fn test_short_day_has_half_hour_delay() {
        let hours = derive("09:00", "16:30");
        assert_eq!(hours.work_hours(), dec("7.5"));
        assert_eq!(hours.delay(), dec("0.5"));
        assert_eq!(hours.overtime_seconds, 0);
    }

    #[test]
    fn test_exact_standard_day_has_neither() {
        let hours = derive("09:00", "17:00");
        assert_eq!(hours.work_seconds, DEFAULT_STANDARD_DAILY_SECONDS);
        assert_eq!(hours.overtime_seconds, 0);
        assert_eq!(hours.delay_seconds, 0);
    }

    #[test]
    fn test_ten_minute_delay_kept_in_whole_seconds() {
        let hours = derive("09:00", "16:50");
        assert_eq!(hours.delay_seconds, 600);
        assert_eq!(hours.overtime_seconds, 0);
    }

    #[test]
    fn test_exit_before_entry_propagates_negative_hours() {
        let hours = derive("18:00", "09:00");
        assert_eq!(hours.work_hours(), dec("-9"));
        assert_eq!(hours.delay(), dec("17"));
        assert_eq!(hours.overtime_seconds, 0);
    }

    #[test]
    fn test_clamp_policy_zeroes_negative_hours() {
        let hours = derive_daily_hours(
            &record("18:00", "09:00"),
            DEFAULT_STANDARD_DAILY_SECONDS,
            NegativeDurationPolicy::Clamp,
        );
        assert_eq!(hours.work_seconds, 0);
        assert_eq!(hours.delay(), dec("8"));
    }

    #[test]
    fn test_custom_standard_day() {
        let hours = derive_daily_hours(
            &record("09:00", "17:00"),
            27_000,
            NegativeDurationPolicy::Propagate,
        );
        assert_eq!(hours.overtime(), dec("0.5"));
    }

    #[test]
    fn test_permission_seconds_respect_policy() {
        let permission = PermissionRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            department: "Sales".to_string(),
            employee: "Alice".to_string(),
            start: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
        };
        assert_eq!(
            derive_permission_seconds(&permission, NegativeDurationPolicy::Propagate),
            -5_400
        );
        assert_eq!(derive_permission_seconds(&permission, NegativeDurationPolicy::Clamp), 0);
    }
}
