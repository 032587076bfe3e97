//! Permission join and leave exclusion.
//!
//! Attendance is left-joined to permission hours on the exact
//! (date, department, employee) triple, flagged against the holiday ranges
//! and the weekend, and every row on leave is dropped. The weekend flag is
//! informational and never affects retention.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::{DuplicatePermissionPolicy, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, DerivedAttendanceRow, HolidayRecord, PermissionRecord, YearMonth,
    hours_from_seconds,
};

use super::derivation::{derive_daily_hours, derive_permission_seconds};

type JoinKey = (NaiveDate, String, String);

fn join_key(date: NaiveDate, department: &str, employee: &str) -> JoinKey {
    (date, department.to_string(), employee.to_string())
}

/// Permission seconds keyed by (date, department, employee).
#[derive(Debug, Clone, Default)]
pub struct PermissionIndex {
    seconds: HashMap<JoinKey, i64>,
    merged_duplicates: usize,
}

impl PermissionIndex {
    /// Builds the index, resolving duplicate keys with `config`'s policy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::JoinAmbiguity`] for the first duplicated key
    /// in feed order when the policy is [`DuplicatePermissionPolicy::Reject`].
    pub fn build(permissions: &[PermissionRecord], config: &EngineConfig) -> EngineResult<Self> {
        let policy = config.duplicate_permissions();
        let mut seconds: HashMap<JoinKey, i64> = HashMap::with_capacity(permissions.len());
        let mut counts: HashMap<JoinKey, usize> = HashMap::new();

        for permission in permissions {
            let key = join_key(permission.date, &permission.department, &permission.employee);
            let value = derive_permission_seconds(permission, config.negative_durations());

            *counts.entry(key.clone()).or_insert(0) += 1;
            seconds
                .entry(key)
                .and_modify(|existing| {
                    if policy == DuplicatePermissionPolicy::Sum {
                        *existing += value;
                    }
                })
                .or_insert(value);
        }

        if policy == DuplicatePermissionPolicy::Reject {
            let first_duplicate = permissions
                .iter()
                .map(|p| join_key(p.date, &p.department, &p.employee))
                .find_map(|key| {
                    let count = counts[&key];
                    (count > 1).then_some((key, count))
                });
            if let Some(((date, department, employee), count)) = first_duplicate {
                warn!(
                    %date,
                    %department,
                    %employee,
                    count,
                    "Duplicate permission rows rejected"
                );
                return Err(EngineError::JoinAmbiguity {
                    date,
                    department,
                    employee,
                    count,
                });
            }
        }

        let merged_duplicates = counts.values().map(|count| count - 1).sum();
        if merged_duplicates > 0 {
            warn!(
                merged_duplicates,
                policy = ?policy,
                "Duplicate permission rows merged"
            );
        }

        Ok(Self {
            seconds,
            merged_duplicates,
        })
    }

    /// Permission seconds for a key, if any permission matched.
    pub fn lookup(&self, date: NaiveDate, department: &str, employee: &str) -> Option<i64> {
        self.seconds.get(&join_key(date, department, employee)).copied()
    }

    /// Number of distinct keys in the index.
    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    /// Returns true when no permissions were indexed.
    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Number of rows folded into an existing key.
    pub fn merged_duplicates(&self) -> usize {
        self.merged_duplicates
    }
}

fn derive_row(
    record: &AttendanceRecord,
    permission_seconds: Option<i64>,
    holidays: &[HolidayRecord],
    config: &EngineConfig,
) -> DerivedAttendanceRow {
    let hours = derive_daily_hours(
        record,
        config.standard_daily_seconds(),
        config.negative_durations(),
    );
    let permission_seconds = permission_seconds.unwrap_or(0);
    let on_leave = holidays
        .iter()
        .any(|holiday| holiday.covers(record.date, &record.department));

    DerivedAttendanceRow {
        employee: record.employee.clone(),
        department: record.department.clone(),
        date: record.date,
        entry: record.entry,
        exit: record.exit,
        work_hours: hours.work_hours(),
        overtime: hours.overtime(),
        delay: hours.delay(),
        overtime_seconds: hours.overtime_seconds,
        delay_seconds: hours.delay_seconds,
        permission_hours: hours_from_seconds(permission_seconds),
        adjusted_work_hours: hours_from_seconds(hours.work_seconds - permission_seconds),
        on_leave,
        is_weekend: record.is_weekend(),
        month: YearMonth::from_date(record.date),
    }
}

/// Derives and annotates one attendance record without filtering it.
pub fn annotate_attendance(
    record: &AttendanceRecord,
    permissions: &PermissionIndex,
    holidays: &[HolidayRecord],
    config: &EngineConfig,
) -> DerivedAttendanceRow {
    let permission_seconds = permissions.lookup(record.date, &record.department, &record.employee);
    derive_row(record, permission_seconds, holidays, config)
}

/// The rows left after leave exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Rows not on leave, in feed order.
    pub surviving: Vec<DerivedAttendanceRow>,
    /// Rows dropped because a holiday range covered them.
    pub excluded_on_leave: usize,
    /// Rows that matched a permission key, before exclusion.
    pub permission_matches: usize,
}

/// Joins permissions into attendance and drops every row on leave.
///
/// # Example
///
/// ```
/// use attendance_metrics::calculation::{join_and_exclude, PermissionIndex};
/// use attendance_metrics::config::EngineConfig;
/// use attendance_metrics::models::{AttendanceRecord, HolidayRecord};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let config = EngineConfig::default();
/// let attendance = vec![AttendanceRecord {
///     employee: "Alice".to_string(),
///     department: "Sales".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
///     entry: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     exit: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// }];
/// let holidays = vec![HolidayRecord {
///     start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     end: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
///     department: None,
/// }];
/// let permissions = PermissionIndex::build(&[], &config).unwrap();
///
/// let outcome = join_and_exclude(&attendance, &permissions, &holidays, &config);
/// assert!(outcome.surviving.is_empty());
/// assert_eq!(outcome.excluded_on_leave, 1);
/// ```
pub fn join_and_exclude(
    attendance: &[AttendanceRecord],
    permissions: &PermissionIndex,
    holidays: &[HolidayRecord],
    config: &EngineConfig,
) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();

    for record in attendance {
        let permission_seconds =
            permissions.lookup(record.date, &record.department, &record.employee);
        if permission_seconds.is_some() {
            outcome.permission_matches += 1;
        }
        let row = derive_row(record, permission_seconds, holidays, config);
        if row.on_leave {
            outcome.excluded_on_leave += 1;
        } else {
            outcome.surviving.push(row);
        }
    }

    debug!(
        surviving = outcome.surviving.len(),
        excluded_on_leave = outcome.excluded_on_leave,
        permission_matches = outcome.permission_matches,
        "Joined permissions and excluded leave"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn attendance(employee: &str, day: &str, exit: NaiveTime) -> AttendanceRecord {
        AttendanceRecord {
            employee: employee.to_string(),
            department: "Sales".to_string(),
            date: date(day),
            entry: hm(9, 0),
            exit,
        }
    }

    fn permission(employee: &str, day: &str, start: NaiveTime, end: NaiveTime) -> PermissionRecord {
        PermissionRecord {
            date: date(day),
            department: "Sales".to_string(),
            employee: employee.to_string(),
            start,
            end,
        }
    }

    fn holiday(start: &str, end: &str) -> HolidayRecord {
        HolidayRecord {
            start: date(start),
            end: date(end),
            department: None,
        }
    }

    #[test]
    fn test_unmatched_row_gets_zero_permission_hours() {
        let config = EngineConfig::default();
        let index = PermissionIndex::build(
            &[permission("Bob", "2024-01-09", hm(10, 0), hm(11, 0))],
            &config,
        )
        .unwrap();

        let record = attendance("Alice", "2024-01-09", hm(16, 0));
        let row = annotate_attendance(&record, &index, &[], &config);

        assert_eq!(row.permission_hours, Decimal::ZERO);
        assert_eq!(row.adjusted_work_hours, row.work_hours);
    }

    #[test]
    fn test_matched_row_gets_permission_hours() {
        let config = EngineConfig::default();
        let index = PermissionIndex::build(
            &[permission("Alice", "2024-01-09", hm(10, 0), hm(11, 30))],
            &config,
        )
        .unwrap();

        let record = attendance("Alice", "2024-01-09", hm(16, 0));
        let row = annotate_attendance(&record, &index, &[], &config);

        assert_eq!(row.permission_hours, dec("1.5"));
        assert_eq!(row.adjusted_work_hours, dec("5.5"));
        // Delay is not reduced by the permission
        assert_eq!(row.delay, dec("1"));
    }

    #[test]
    fn test_join_key_is_exact() {
        let config = EngineConfig::default();
        let mut other_department = permission("Alice", "2024-01-09", hm(10, 0), hm(11, 0));
        other_department.department = "sales".to_string();
        let index = PermissionIndex::build(&[other_department], &config).unwrap();

        assert_eq!(index.lookup(date("2024-01-09"), "Sales", "Alice"), None);
    }

    #[test]
    fn test_duplicates_summed_by_default() {
        let config = EngineConfig::default();
        let index = PermissionIndex::build(
            &[
                permission("Alice", "2024-01-09", hm(10, 0), hm(11, 0)),
                permission("Alice", "2024-01-09", hm(14, 0), hm(14, 30)),
            ],
            &config,
        )
        .unwrap();

        assert_eq!(index.lookup(date("2024-01-09"), "Sales", "Alice"), Some(5_400));
        assert_eq!(index.len(), 1);
        assert_eq!(index.merged_duplicates(), 1);
    }

    #[test]
    fn test_duplicates_first_match() {
        let config = EngineConfig::default()
            .with_duplicate_permissions(DuplicatePermissionPolicy::FirstMatch);
        let index = PermissionIndex::build(
            &[
                permission("Alice", "2024-01-09", hm(10, 0), hm(11, 0)),
                permission("Alice", "2024-01-09", hm(14, 0), hm(14, 30)),
            ],
            &config,
        )
        .unwrap();

        assert_eq!(index.lookup(date("2024-01-09"), "Sales", "Alice"), Some(3_600));
    }

    #[test]
    fn test_duplicates_rejected() {
        let config =
            EngineConfig::default().with_duplicate_permissions(DuplicatePermissionPolicy::Reject);
        let result = PermissionIndex::build(
            &[
                permission("Bob", "2024-01-08", hm(10, 0), hm(11, 0)),
                permission("Alice", "2024-01-09", hm(10, 0), hm(11, 0)),
                permission("Alice", "2024-01-09", hm(14, 0), hm(14, 30)),
                permission("Alice", "2024-01-09", hm(15, 0), hm(15, 30)),
            ],
            &config,
        );

        match result {
            Err(EngineError::JoinAmbiguity {
                date: d,
                department,
                employee,
                count,
            }) => {
                assert_eq!(d, date("2024-01-09"));
                assert_eq!(department, "Sales");
                assert_eq!(employee, "Alice");
                assert_eq!(count, 3);
            }
            other => panic!("Expected JoinAmbiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_policy_accepts_unique_keys() {
        let config =
            EngineConfig::default().with_duplicate_permissions(DuplicatePermissionPolicy::Reject);
        let index = PermissionIndex::build(
            &[
                permission("Alice", "2024-01-09", hm(10, 0), hm(11, 0)),
                permission("Alice", "2024-01-10", hm(10, 0), hm(11, 0)),
            ],
            &config,
        )
        .unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_holiday_rows_dropped_even_on_weekdays() {
        let config = EngineConfig::default();
        let index = PermissionIndex::default();
        // 2024-01-09 Tuesday, 2024-01-10 Wednesday, 2024-01-13 Saturday
        let rows = vec![
            attendance("Alice", "2024-01-09", hm(17, 0)),
            attendance("Alice", "2024-01-10", hm(17, 0)),
            attendance("Alice", "2024-01-13", hm(17, 0)),
        ];
        let holidays = vec![holiday("2024-01-10", "2024-01-12")];

        let outcome = join_and_exclude(&rows, &index, &holidays, &config);

        assert_eq!(outcome.excluded_on_leave, 1);
        assert_eq!(outcome.surviving.len(), 2);
        assert_eq!(outcome.surviving[0].date, date("2024-01-09"));
        assert!(!outcome.surviving[0].is_weekend);
        // Weekend rows outside holidays are retained
        assert_eq!(outcome.surviving[1].date, date("2024-01-13"));
        assert!(outcome.surviving[1].is_weekend);
    }

    #[test]
    fn test_weekend_holiday_row_dropped() {
        let config = EngineConfig::default();
        let rows = vec![attendance("Alice", "2024-01-13", hm(17, 0))];
        let holidays = vec![holiday("2024-01-13", "2024-01-14")];

        let outcome = join_and_exclude(&rows, &PermissionIndex::default(), &holidays, &config);

        assert!(outcome.surviving.is_empty());
        assert_eq!(outcome.excluded_on_leave, 1);
    }

    #[test]
    fn test_overlapping_holidays_count_row_once() {
        let config = EngineConfig::default();
        let rows = vec![attendance("Alice", "2024-01-11", hm(17, 0))];
        let holidays = vec![
            holiday("2024-01-10", "2024-01-12"),
            holiday("2024-01-11", "2024-01-11"),
        ];

        let outcome = join_and_exclude(&rows, &PermissionIndex::default(), &holidays, &config);

        assert_eq!(outcome.excluded_on_leave, 1);
    }

    #[test]
    fn test_department_scoped_holiday() {
        let config = EngineConfig::default();
        let mut support = attendance("Bob", "2024-01-11", hm(17, 0));
        support.department = "Support".to_string();
        let rows = vec![attendance("Alice", "2024-01-11", hm(17, 0)), support];
        let holidays = vec![HolidayRecord {
            start: date("2024-01-11"),
            end: date("2024-01-11"),
            department: Some("Sales".to_string()),
        }];

        let outcome = join_and_exclude(&rows, &PermissionIndex::default(), &holidays, &config);

        assert_eq!(outcome.surviving.len(), 1);
        assert_eq!(outcome.surviving[0].employee, "Bob");
    }

    #[test]
    fn test_rows_annotated_with_month() {
        let config = EngineConfig::default();
        let rows = vec![attendance("Alice", "2024-02-29", hm(17, 0))];

        let outcome = join_and_exclude(&rows, &PermissionIndex::default(), &[], &config);

        assert_eq!(outcome.surviving[0].month.to_string(), "2024-02");
    }

    #[test]
    fn test_permission_matches_counted() {
        let config = EngineConfig::default();
        let index = PermissionIndex::build(
            &[permission("Alice", "2024-01-09", hm(10, 0), hm(11, 0))],
            &config,
        )
        .unwrap();
        let rows = vec![
            attendance("Alice", "2024-01-09", hm(17, 0)),
            attendance("Alice", "2024-01-10", hm(17, 0)),
        ];

        let outcome = join_and_exclude(&rows, &index, &[], &config);

        assert_eq!(outcome.permission_matches, 1);
    }

    #[test]
    fn test_matched_row_on_leave_counts_match_and_is_dropped() {
        let config = EngineConfig::default();
        let index = PermissionIndex::build(
            &[
                permission("Alice", "2024-01-09", hm(10, 0), hm(11, 0)),
                permission("Alice", "2024-01-10", hm(10, 0), hm(12, 0)),
            ],
            &config,
        )
        .unwrap();
        let rows = vec![
            attendance("Alice", "2024-01-09", hm(17, 0)),
            attendance("Alice", "2024-01-10", hm(17, 0)),
        ];
        let holidays = vec![holiday("2024-01-10", "2024-01-10")];

        let outcome = join_and_exclude(&rows, &index, &holidays, &config);

        assert_eq!(outcome.permission_matches, 2);
        assert_eq!(outcome.excluded_on_leave, 1);
        assert_eq!(outcome.surviving.len(), 1);
        assert_eq!(outcome.surviving[0].permission_hours, dec("1"));
    }

    #[test]
    fn test_rows_carry_whole_second_delay_and_overtime() {
        let config = EngineConfig::default();
        let rows = vec![
            attendance("Alice", "2024-01-09", hm(16, 50)),
            attendance("Alice", "2024-01-10", hm(17, 10)),
        ];

        let outcome = join_and_exclude(&rows, &PermissionIndex::default(), &[], &config);

        assert_eq!(outcome.surviving[0].delay_seconds, 600);
        assert_eq!(outcome.surviving[0].overtime_seconds, 0);
        assert_eq!(outcome.surviving[1].overtime_seconds, 600);
        assert_eq!(outcome.surviving[1].delay_seconds, 0);
    }
}
