//! Property tests for the metrics pipeline.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use attendance_metrics::calculation::{
    PermissionIndex, aggregate_monthly, classify_totals, derive_daily_hours, join_and_exclude,
    select_tier_rate,
};
use attendance_metrics::config::{
    DEFAULT_STANDARD_DAILY_SECONDS, EngineConfig, NegativeDurationPolicy, TierTable,
};
use attendance_metrics::models::{AttendanceRecord, HolidayRecord, SECONDS_PER_HOUR};

fn time_from_minutes(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn record(employee: &str, day_offset: i64, entry: u32, exit: u32) -> AttendanceRecord {
    AttendanceRecord {
        employee: employee.to_string(),
        department: "Sales".to_string(),
        date: base_date() + Duration::days(day_offset),
        entry: time_from_minutes(entry),
        exit: time_from_minutes(exit),
    }
}

proptest! {
    #[test]
    fn overtime_and_delay_follow_work_hours(entry in 0u32..1440, exit in 0u32..1440) {
        let standard = DEFAULT_STANDARD_DAILY_SECONDS;
        let hours = derive_daily_hours(
            &record("Alice", 0, entry, exit),
            standard,
            NegativeDurationPolicy::Propagate,
        );

        if hours.work_seconds >= standard {
            prop_assert_eq!(hours.delay_seconds, 0);
            prop_assert_eq!(hours.overtime_seconds, hours.work_seconds - standard);
        } else {
            prop_assert_eq!(hours.overtime_seconds, 0);
            prop_assert_eq!(hours.delay_seconds, standard - hours.work_seconds);
        }
    }

    #[test]
    fn tier_rate_is_monotonic(a in 0i64..5000, b in 0i64..5000) {
        let table = TierTable::standard();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_rate = select_tier_rate(Decimal::new(low, 2), &table);
        let high_rate = select_tier_rate(Decimal::new(high, 2), &table);
        prop_assert!(low_rate <= high_rate);
    }

    #[test]
    fn holiday_rows_never_survive(
        days in prop::collection::vec((0i64..60, 360u32..720, 720u32..1320), 0..40),
        holiday_start in 0i64..60,
        holiday_len in 0i64..10,
    ) {
        let config = EngineConfig::default();
        let attendance: Vec<AttendanceRecord> = days
            .iter()
            .map(|&(offset, entry, exit)| record("Alice", offset, entry, exit))
            .collect();
        let holiday = HolidayRecord {
            start: base_date() + Duration::days(holiday_start),
            end: base_date() + Duration::days(holiday_start + holiday_len),
            department: None,
        };

        let outcome = join_and_exclude(
            &attendance,
            &PermissionIndex::default(),
            std::slice::from_ref(&holiday),
            &config,
        );

        prop_assert!(
            outcome
                .surviving
                .iter()
                .all(|row| !holiday.covers(row.date, &row.department))
        );
        prop_assert_eq!(outcome.surviving.len() + outcome.excluded_on_leave, attendance.len());
    }

    #[test]
    fn monthly_sums_match_row_sums(
        days in prop::collection::vec((0usize..3, 0i64..90, 0u32..1440, 0u32..1440), 0..60),
    ) {
        let employees = ["Alice", "Bob", "Carol"];
        let config = EngineConfig::default();
        let attendance: Vec<AttendanceRecord> = days
            .iter()
            .map(|&(who, offset, entry, exit)| record(employees[who], offset, entry, exit))
            .collect();

        let outcome = join_and_exclude(&attendance, &PermissionIndex::default(), &[], &config);
        let totals = aggregate_monthly(&outcome.surviving);

        let group_rows: usize = totals.iter().map(|t| t.days).sum();
        prop_assert_eq!(group_rows, outcome.surviving.len());

        for group in &totals {
            let members = outcome.surviving.iter().filter(|row| {
                row.employee == group.employee
                    && row.department == group.department
                    && row.month == group.month
            });
            let (delay, overtime) = members.fold((0, 0), |(d, o), row| {
                (d + row.delay_seconds, o + row.overtime_seconds)
            });
            prop_assert_eq!(group.delay_seconds, delay);
            prop_assert_eq!(group.overtime_seconds, overtime);
        }
    }

    #[test]
    fn whole_hour_delay_totals_classify_at_threshold(
        hours in prop::sample::select(vec![3i64, 10, 20]),
        minutes_per_day in prop::sample::select(vec![1i64, 5, 7, 10, 11, 13, 25]),
    ) {
        // Minute-granular short days whose delay sums to a whole threshold.
        let target = hours * SECONDS_PER_HOUR;
        let per_day = minutes_per_day * 60;
        let mut days: Vec<AttendanceRecord> = (0..target / per_day)
            .map(|d| record("Alice", d % 28, 540, 1020 - minutes_per_day as u32))
            .collect();
        let remainder = (target % per_day) / 60;
        if remainder > 0 {
            days.push(record("Alice", 0, 540, 1020 - remainder as u32));
        }

        let config = EngineConfig::default();
        let outcome = join_and_exclude(&days, &PermissionIndex::default(), &[], &config);
        let totals = aggregate_monthly(&outcome.surviving);
        prop_assert_eq!(totals.len(), 1);
        prop_assert_eq!(totals[0].delay_seconds, target);

        let table = TierTable::standard();
        let row = classify_totals(totals[0].clone(), &table, &table);
        prop_assert_eq!(row.delay, Decimal::from(hours));
        prop_assert_eq!(row.fine, select_tier_rate(Decimal::from(hours), &table));
    }
}
