//! End-to-end metrics run.
//!
//! Chains the stages in order: parse, derive and join, exclude leave,
//! aggregate by month, classify tiers. A run is a pure function of its
//! snapshot and configuration.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{FeedSnapshot, MetricsReport, RunStats};

use super::aggregation::aggregate_monthly;
use super::feed_parser::{ParsedFeeds, parse_feeds};
use super::join::{PermissionIndex, join_and_exclude};
use super::tier_classifier::classify_totals;

/// Runs the full pipeline over one snapshot of the three feeds.
///
/// # Errors
///
/// - [`crate::error::EngineError::MalformedField`] when any value fails to parse
/// - [`crate::error::EngineError::JoinAmbiguity`] when duplicate permissions
///   are configured to be rejected
///
/// An empty attendance feed is not an error and yields an empty report.
///
/// # Example
///
/// ```
/// use attendance_metrics::calculation::run_metrics;
/// use attendance_metrics::config::EngineConfig;
/// use attendance_metrics::models::FeedSnapshot;
///
/// let report = run_metrics(&FeedSnapshot::default(), &EngineConfig::default()).unwrap();
/// assert!(report.is_empty());
/// ```
pub fn run_metrics(snapshot: &FeedSnapshot, config: &EngineConfig) -> EngineResult<MetricsReport> {
    let parsed = parse_feeds(snapshot, config.formats()).inspect_err(|err| {
        warn!(error = %err, "Feed parsing failed, aborting run");
    })?;
    debug!(
        attendance = parsed.attendance.len(),
        holidays = parsed.holidays.len(),
        permissions = parsed.permissions.len(),
        "Parsed feeds"
    );
    run_parsed(&parsed, config)
}

/// Runs the pipeline over feeds that are already parsed.
pub fn run_parsed(parsed: &ParsedFeeds, config: &EngineConfig) -> EngineResult<MetricsReport> {
    let start_time = Instant::now();
    let run_id = Uuid::new_v4();
    info!(
        run_id = %run_id,
        attendance_rows = parsed.attendance.len(),
        "Starting metrics run"
    );

    let permissions = PermissionIndex::build(&parsed.permissions, config)?;
    let joined = join_and_exclude(&parsed.attendance, &permissions, &parsed.holidays, config);

    let totals = aggregate_monthly(&joined.surviving);
    debug!(groups = totals.len(), "Aggregated monthly totals");

    let monthly: Vec<_> = totals
        .into_iter()
        .map(|t| classify_totals(t, config.fine_tiers(), config.bonus_tiers()))
        .collect();

    let stats = RunStats {
        attendance_rows: parsed.attendance.len(),
        holiday_ranges: parsed.holidays.len(),
        permission_rows: parsed.permissions.len(),
        permission_matches: joined.permission_matches,
        excluded_on_leave: joined.excluded_on_leave,
        surviving_rows: joined.surviving.len(),
        monthly_groups: monthly.len(),
        duration_us: start_time.elapsed().as_micros() as u64,
    };

    info!(
        run_id = %run_id,
        surviving_rows = stats.surviving_rows,
        excluded_on_leave = stats.excluded_on_leave,
        monthly_groups = stats.monthly_groups,
        duration_us = stats.duration_us,
        "Metrics run completed"
    );

    Ok(MetricsReport {
        run_id,
        generated_at: Utc::now(),
        engine_version: config.metadata().version.clone(),
        monthly,
        records: joined.surviving,
        stats,
    })
}
