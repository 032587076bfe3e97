//! Attendance Metrics Engine
//!
//! This crate turns three HR feeds (attendance swipes, holiday ranges and
//! permission windows) into per-employee monthly delay, overtime, fine and
//! bonus figures, and exposes the pipeline over a small HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
