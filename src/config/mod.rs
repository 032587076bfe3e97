//! Configuration loading and management for the Attendance Metrics Engine.
//!
//! This module provides functionality to load engine configuration from YAML
//! files: the standard working day, fine and bonus tier tables, the policies
//! for duplicate permissions and negative durations, and feed field formats.
//!
//! # Example
//!
//! ```no_run
//! use attendance_metrics::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_STANDARD_DAILY_HOURS, DEFAULT_STANDARD_DAILY_SECONDS, DEFAULT_TIERS,
    DuplicatePermissionPolicy, EngineConfig, EngineFile, EngineMetadata, FeedFormats,
    NegativeDurationPolicy, Tier, TierTable, TiersFile, standard_day_seconds,
};
