//! Batch pipeline: load, merge, aggregate, persist.
//!
//! Input loading and the threshold severity invariant are fatal for the
//! whole run. After that, every aggregation+write pair is an independent
//! unit of work: a failing unit is recorded in the run statistics and the
//! remaining tables are still produced.

use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::aggregators::{count_alarms, count_valid, level_3_exclusive, summarize_zone, validity_ratio};
use crate::config::RunConfig;
use crate::error::Result;
use crate::merge::{extract_subset, merge_readings, pollutant_columns, station_list};
use crate::models::check_severity_invariant;
use crate::reader::{read_readings, read_threshold_table, read_zone_registry};
use crate::writer::persist_table;

/// Accounting for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Output tables successfully written, with their paths.
    pub tables_written: Vec<(String, PathBuf)>,
    /// Output tables that failed, with the failure reason.
    pub failures: Vec<(String, String)>,
    /// Rows in the merged readings table.
    pub merged_rows: usize,
    /// Stations present in the merged table.
    pub stations: usize,
    /// Pollutant columns in the merged table.
    pub pollutants: usize,
    /// Total wall-clock processing time.
    pub processing_time: Duration,
}

impl RunStats {
    pub fn add_failure(&mut self, table: &str, reason: String) {
        self.failures.push((table.to_string(), reason));
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One batch run over one period's data.
#[derive(Debug)]
pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Execute the full run.
    pub fn run(&self) -> Result<RunStats> {
        let start = Instant::now();
        std::fs::create_dir_all(&self.config.output_dir)?;

        // Fatal stage: inputs, thresholds, zones.
        let mut frames = Vec::with_capacity(self.config.inputs.len());
        for path in &self.config.inputs {
            frames.push(read_readings(path)?);
        }
        let merged = merge_readings(frames)?;

        let level_2 = read_threshold_table(&self.config.level_2_path, "level-2")?;
        let level_3 = read_threshold_table(&self.config.level_3_path, "level-3")?;
        check_severity_invariant(&level_2, &level_3)?;
        for entry in level_2.entries() {
            if !level_3.contains(&entry.pollutant) {
                warn!(
                    "Pollutant '{}' has a level-2 threshold but no level-3 threshold; \
                     its level-3 counts will not be adjusted",
                    entry.pollutant
                );
            }
        }

        let registry = read_zone_registry(&self.config.zones_path)?;

        let stations = station_list(&merged)?;
        let pollutants = pollutant_columns(&merged);
        info!(
            "Merged {} rows across {} stations and {} pollutants",
            merged.height(),
            stations.len(),
            pollutants.len()
        );

        let mut stats = RunStats {
            merged_rows: merged.height(),
            stations: stations.len(),
            pollutants: pollutants.len(),
            ..Default::default()
        };

        // Independent units of work from here on.
        self.persist_unit("all_pollutants_raw", Ok(merged.clone()), &mut stats);

        self.persist_unit(
            "level2_pollutants_raw",
            extract_subset(&merged, &level_2.pollutants()),
            &mut stats,
        );
        self.persist_unit(
            "level3_pollutants_raw",
            extract_subset(&merged, &level_3.pollutants()),
            &mut stats,
        );

        self.persist_unit(
            "validity_counts",
            count_valid(&merged, &stations, &pollutants),
            &mut stats,
        );
        self.persist_unit(
            "validity_ratios",
            validity_ratio(&merged, &stations, &pollutants),
            &mut stats,
        );

        let level_2_counts = count_alarms(&merged, &stations, &level_2);
        self.persist_unit(
            "level2_alarm_counts",
            level_2_counts.as_ref().map(|df| df.clone()).map_err(clone_reason),
            &mut stats,
        );

        let exclusive = count_alarms(&merged, &stations, &level_3).and_then(|level_3_counts| {
            let level_2_counts = level_2_counts.as_ref().map_err(clone_reason)?;
            level_3_exclusive(&level_3_counts, level_2_counts)
        });
        self.persist_unit("level3_alarm_counts", exclusive, &mut stats);

        for zone in registry.zone_names() {
            self.persist_unit(
                &format!("vocs_alarms_{}", zone),
                summarize_zone(
                    &merged,
                    &self.config.vocs.pollutant,
                    self.config.vocs.threshold,
                    &zone,
                    &registry,
                ),
                &mut stats,
            );
        }

        stats.processing_time = start.elapsed();
        Ok(stats)
    }

    /// Persist one result table, recording success or failure without
    /// aborting the run.
    fn persist_unit(&self, table: &str, result: Result<DataFrame>, stats: &mut RunStats) {
        let outcome = result.and_then(|df| {
            let path = self.config.output_path(table);
            persist_table(df, &path, self.config.format)?;
            Ok(path)
        });

        match outcome {
            Ok(path) => {
                info!("Wrote table '{}' to {}", table, path.display());
                stats.tables_written.push((table.to_string(), path));
            }
            Err(err) => {
                error!("Table '{}' failed: {}", table, err);
                stats.add_failure(table, err.to_string());
            }
        }
    }
}

/// The level-2 counts feed two units; errors cross the units as
/// configuration errors carrying the original reason.
fn clone_reason(err: &crate::error::VocsError) -> crate::error::VocsError {
    crate::error::VocsError::configuration(err.to_string())
}
