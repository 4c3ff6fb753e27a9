//! Run configuration for the processing pipeline.
//!
//! Everything a run needs (input paths, period label, VOCs settings, output
//! format) travels in one explicit structure handed to the pipeline; there
//! is no module-level state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_OUTPUT_DIR, VOCS_ALARM_THRESHOLD, VOCS_POLLUTANT};

/// Output format for persisted result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

/// Settings for the zoned VOCs alarm summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocsConfig {
    /// Pollutant column the zoned summary pivots on.
    pub pollutant: String,

    /// Fixed alarm threshold for that pollutant.
    pub threshold: f64,
}

impl Default for VocsConfig {
    fn default() -> Self {
        Self {
            pollutant: VOCS_POLLUTANT.to_string(),
            threshold: VOCS_ALARM_THRESHOLD,
        }
    }
}

/// Complete configuration for one processing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Raw readings tables to merge (two or more in a normal run).
    pub inputs: Vec<PathBuf>,

    /// Level-2 (stricter tier) threshold table.
    pub level_2_path: PathBuf,

    /// Level-3 (looser tier, superset) threshold table.
    pub level_3_path: PathBuf,

    /// Station-to-zone membership table.
    pub zones_path: PathBuf,

    /// Directory result tables are written into.
    pub output_dir: PathBuf,

    /// Period label prefixed to every output file name.
    pub period: String,

    /// Zoned VOCs summary settings.
    pub vocs: VocsConfig,

    /// Format for persisted result tables.
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            level_2_path: PathBuf::new(),
            level_3_path: PathBuf::new(),
            zones_path: PathBuf::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            period: default_period(),
            vocs: VocsConfig::default(),
            format: OutputFormat::Csv,
        }
    }
}

impl RunConfig {
    /// Path for a named output table: `<output_dir>/<period>_<stem>.<ext>`.
    pub fn output_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.{}", self.period, stem, self.format.extension()))
    }
}

/// Default period label: the current month.
pub fn default_period() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_carries_period_and_format() {
        let config = RunConfig {
            output_dir: PathBuf::from("/tmp/out"),
            period: "2021-06".to_string(),
            format: OutputFormat::Parquet,
            ..Default::default()
        };
        assert_eq!(
            config.output_path("validity_counts"),
            PathBuf::from("/tmp/out/2021-06_validity_counts.parquet")
        );
    }
}
