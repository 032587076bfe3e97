//! Calculation logic for the Attendance Metrics Engine.
//!
//! This module contains every stage of a metrics run: feed parsing,
//! per-record derivation of work hours, overtime and delay, the permission
//! join with leave exclusion, monthly aggregation, and fine/bonus tier
//! classification, plus [`run_metrics`] which chains them.

mod aggregation;
mod derivation;
mod engine;
mod feed_parser;
mod join;
mod tier_classifier;

pub use aggregation::{MonthlyTotals, aggregate_monthly};
pub use derivation::{
    DailyHours, derive_daily_hours, derive_permission_seconds, split_against_standard,
};
pub use engine::{run_metrics, run_parsed};
pub use feed_parser::{
    ParsedFeeds, parse_attendance, parse_feeds, parse_holidays, parse_permissions,
};
pub use join::{JoinOutcome, PermissionIndex, annotate_attendance, join_and_exclude};
pub use tier_classifier::{classify_totals, select_tier_rate, select_tier_rate_for_seconds};
