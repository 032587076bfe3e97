//! Configuration types for the metrics engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the built-in
//! defaults used when no configuration directory is supplied.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{SECONDS_PER_HOUR, hours_from_seconds};

/// Length of a standard working day in hours.
pub const DEFAULT_STANDARD_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Length of a standard working day in seconds.
pub const DEFAULT_STANDARD_DAILY_SECONDS: i64 = 8 * SECONDS_PER_HOUR;

/// Built-in `(threshold, rate)` pairs shared by the fine and bonus tables.
///
/// Summed hours strictly above 3, 10 and 20 select 2%, 3% and 5%.
pub const DEFAULT_TIERS: [(Decimal, Decimal); 3] = [
    (
        Decimal::from_parts(3, 0, 0, false, 0),
        Decimal::from_parts(2, 0, 0, false, 2),
    ),
    (
        Decimal::from_parts(10, 0, 0, false, 0),
        Decimal::from_parts(3, 0, 0, false, 2),
    ),
    (
        Decimal::from_parts(20, 0, 0, false, 0),
        Decimal::from_parts(5, 0, 0, false, 2),
    ),
];

/// Metadata identifying the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable configuration name.
    pub name: String,
    /// Configuration version, reported in every run.
    pub version: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "Attendance Metrics".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One tier: values strictly above `threshold` earn `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Exclusive lower bound on the summed hours.
    pub threshold: Decimal,
    /// Rate assigned when the threshold is exceeded.
    pub rate: Decimal,
}

/// An ordered list of tiers, validated to have strictly ascending thresholds.
///
/// # Example
///
/// ```
/// use attendance_metrics::config::{Tier, TierTable};
/// use rust_decimal::Decimal;
///
/// let table = TierTable::new(
///     "fine",
///     vec![Tier { threshold: Decimal::new(5, 0), rate: Decimal::new(1, 2) }],
/// )
/// .unwrap();
/// assert_eq!(table.tiers().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Builds a tier table, rejecting unordered thresholds or negative rates.
    ///
    /// `table` names the table in the error message.
    pub fn new(table: &str, tiers: Vec<Tier>) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidTierTable {
            table: table.to_string(),
            message,
        };

        if let Some(pair) = tiers.windows(2).find(|w| w[0].threshold >= w[1].threshold) {
            return Err(invalid(format!(
                "thresholds must be strictly ascending, found {} before {}",
                pair[0].threshold, pair[1].threshold
            )));
        }
        if let Some(tier) = tiers.iter().find(|t| t.rate < Decimal::ZERO) {
            return Err(invalid(format!(
                "rate {} for threshold {} is negative",
                tier.rate, tier.threshold
            )));
        }

        Ok(Self { tiers })
    }

    /// The built-in 3/10/20 hour table.
    pub fn standard() -> Self {
        Self {
            tiers: DEFAULT_TIERS
                .iter()
                .map(|&(threshold, rate)| Tier { threshold, rate })
                .collect(),
        }
    }

    /// The tiers in ascending threshold order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

/// What to do when several permission rows share a (date, department, employee) key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePermissionPolicy {
    /// Add the hours of every matching row.
    #[default]
    Sum,
    /// Keep the first matching row in feed order.
    FirstMatch,
    /// Abort the run with a join ambiguity error.
    Reject,
}

/// How to treat durations whose end precedes their start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeDurationPolicy {
    /// Keep the negative value.
    #[default]
    Propagate,
    /// Replace negative work and permission hours with zero.
    Clamp,
}

/// chrono format strings for each feed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedFormats {
    /// Attendance Entry/Exit.
    pub attendance_time: String,
    /// Permission Start/End.
    pub permission_time: String,
    /// Every date field.
    pub date: String,
}

impl Default for FeedFormats {
    fn default() -> Self {
        Self {
            attendance_time: "%H:%M".to_string(),
            permission_time: "%H:%M:%S".to_string(),
            date: "%Y-%m-%d".to_string(),
        }
    }
}

fn default_standard_daily_hours() -> Decimal {
    DEFAULT_STANDARD_DAILY_HOURS
}

/// Converts a standard day given in hours to whole seconds.
///
/// # Errors
///
/// Returns [`EngineError::InvalidStandardDay`] unless `hours` is positive
/// and a whole number of seconds.
///
/// # Example
///
/// ```
/// use attendance_metrics::config::standard_day_seconds;
/// use rust_decimal::Decimal;
///
/// assert_eq!(standard_day_seconds(Decimal::new(75, 1)).unwrap(), 27_000);
/// assert!(standard_day_seconds(Decimal::ZERO).is_err());
/// ```
pub fn standard_day_seconds(hours: Decimal) -> EngineResult<i64> {
    let invalid = || EngineError::InvalidStandardDay { hours };
    if hours <= Decimal::ZERO {
        return Err(invalid());
    }
    let seconds = hours
        .checked_mul(Decimal::from(SECONDS_PER_HOUR))
        .ok_or_else(invalid)?;
    if !seconds.fract().is_zero() {
        return Err(invalid());
    }
    seconds.to_i64().ok_or_else(invalid)
}

/// Structure of `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Configuration metadata.
    pub metadata: EngineMetadata,
    /// Hours in a standard day.
    #[serde(default = "default_standard_daily_hours")]
    pub standard_daily_hours: Decimal,
    /// Duplicate permission handling.
    #[serde(default)]
    pub duplicate_permissions: DuplicatePermissionPolicy,
    /// Negative duration handling.
    #[serde(default)]
    pub negative_durations: NegativeDurationPolicy,
    /// Feed field formats.
    #[serde(default)]
    pub formats: FeedFormats,
}

/// Structure of `tiers.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TiersFile {
    /// Fine tiers keyed on summed delay.
    pub fine: Vec<Tier>,
    /// Bonus tiers keyed on summed overtime.
    pub bonus: Vec<Tier>,
}

/// Everything a run needs besides the feeds themselves.
///
/// `EngineConfig::default()` reproduces the fixed rules: an 8 hour day,
/// 3/10/20 hour tiers at 2/3/5%, summed duplicate permissions and
/// unclamped negative durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    standard_daily_seconds: i64,
    fine_tiers: TierTable,
    bonus_tiers: TierTable,
    duplicate_permissions: DuplicatePermissionPolicy,
    negative_durations: NegativeDurationPolicy,
    formats: FeedFormats,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            metadata: EngineMetadata::default(),
            standard_daily_seconds: DEFAULT_STANDARD_DAILY_SECONDS,
            fine_tiers: TierTable::standard(),
            bonus_tiers: TierTable::standard(),
            duplicate_permissions: DuplicatePermissionPolicy::default(),
            negative_durations: NegativeDurationPolicy::default(),
            formats: FeedFormats::default(),
        }
    }
}

impl EngineConfig {
    /// Assembles a configuration from the two YAML files.
    ///
    /// # Errors
    ///
    /// Fails when either tier table is invalid or the standard day is not
    /// a positive whole number of seconds.
    pub fn from_files(engine: EngineFile, tiers: TiersFile) -> EngineResult<Self> {
        Ok(Self {
            metadata: engine.metadata,
            standard_daily_seconds: standard_day_seconds(engine.standard_daily_hours)?,
            fine_tiers: TierTable::new("fine", tiers.fine)?,
            bonus_tiers: TierTable::new("bonus", tiers.bonus)?,
            duplicate_permissions: engine.duplicate_permissions,
            negative_durations: engine.negative_durations,
            formats: engine.formats,
        })
    }

    /// Replaces the length of the standard day.
    pub fn with_standard_daily_hours(mut self, hours: Decimal) -> EngineResult<Self> {
        self.standard_daily_seconds = standard_day_seconds(hours)?;
        Ok(self)
    }

    /// Replaces the fine and bonus tables.
    pub fn with_tiers(mut self, fine_tiers: TierTable, bonus_tiers: TierTable) -> Self {
        self.fine_tiers = fine_tiers;
        self.bonus_tiers = bonus_tiers;
        self
    }

    /// Replaces the duplicate permission policy.
    pub fn with_duplicate_permissions(mut self, policy: DuplicatePermissionPolicy) -> Self {
        self.duplicate_permissions = policy;
        self
    }

    /// Replaces the negative duration policy.
    pub fn with_negative_durations(mut self, policy: NegativeDurationPolicy) -> Self {
        self.negative_durations = policy;
        self
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Hours in a standard working day.
    pub fn standard_daily_hours(&self) -> Decimal {
        hours_from_seconds(self.standard_daily_seconds)
    }

    /// Seconds in a standard working day.
    pub fn standard_daily_seconds(&self) -> i64 {
        self.standard_daily_seconds
    }

    /// Fine tiers keyed on summed delay.
    pub fn fine_tiers(&self) -> &TierTable {
        &self.fine_tiers
    }

    /// Bonus tiers keyed on summed overtime.
    pub fn bonus_tiers(&self) -> &TierTable {
        &self.bonus_tiers
    }

    /// Duplicate permission handling.
    pub fn duplicate_permissions(&self) -> DuplicatePermissionPolicy {
        self.duplicate_permissions
    }

    /// Negative duration handling.
    pub fn negative_durations(&self) -> NegativeDurationPolicy {
        self.negative_durations
    }

    /// Feed field formats.
    pub fn formats(&self) -> &FeedFormats {
        &self.formats
    }
}
