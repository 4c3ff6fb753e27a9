//! VOCs Alarm-Statistics Processor
//!
//! A library for deriving per-station statistics from hourly pollutant
//! readings collected by air-quality monitoring stations:
//!
//! - Merging per-pollutant readings tables into one wide table keyed by
//!   (station, timestamp)
//! - Counting valid (non-missing) readings and computing validity ratios
//! - Counting threshold exceedances at two severity tiers, including the
//!   level-3-only band obtained by subtraction
//! - Summarizing one pollutant's alarms per geographic zone as a
//!   time x station matrix with totals

pub mod aggregators;
pub mod config;
pub mod constants;
pub mod error;
pub mod merge;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod writer;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{OutputFormat, RunConfig, VocsConfig};
pub use error::{Result, VocsError};
pub use models::{ThresholdEntry, ThresholdTable, Zone, ZoneRegistry};
pub use pipeline::{Pipeline, RunStats};
