//! CSV loading for readings tables, threshold tables, and zone membership.
//!
//! Readings tables arrive with a units row directly under the header; that
//! row is skipped at read time. The first two columns are the station
//! identifier and the timestamp label, whatever their source names; they
//! are normalized to the canonical column names so the rest of the pipeline
//! never cares what the exporting system called them.

use polars::prelude::*;
use std::path::Path;
use tracing::debug;

use crate::constants::{KEY_COL_COUNT, STATION_COL, TIME_COL};
use crate::error::{Result, VocsError};
use crate::models::{ThresholdTable, ZoneRegistry};

fn read_csv(path: &Path, skip_units_row: bool) -> Result<DataFrame> {
    if !path.exists() {
        return Err(VocsError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let skip = if skip_units_row { 1 } else { 0 };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows_after_header(skip)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Load one raw readings table.
///
/// The first two columns are renamed to [`STATION_COL`] and [`TIME_COL`];
/// every remaining column is a pollutant and is cast to Float64 so that
/// missing readings stay null rather than becoming zero.
pub fn read_readings(path: &Path) -> Result<DataFrame> {
    let mut df = read_csv(path, true)?;

    if df.width() <= KEY_COL_COUNT {
        return Err(VocsError::MalformedTable {
            path: path.to_path_buf(),
            reason: format!(
                "expected station and timestamp columns plus at least one pollutant, found {} columns",
                df.width()
            ),
        });
    }

    let names: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|s| s.to_string())
        .collect();

    df.rename(&names[0], STATION_COL.into())?;
    df.rename(&names[1], TIME_COL.into())?;

    let station = df.column(STATION_COL)?.cast(&DataType::String)?;
    df.with_column(station)?;
    let timestamp = df.column(TIME_COL)?.cast(&DataType::String)?;
    df.with_column(timestamp)?;

    for name in names.iter().skip(KEY_COL_COUNT) {
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        df.with_column(casted)?;
    }

    Ok(df)
}

/// Load a two-column (pollutant, threshold) table.
pub fn read_threshold_table(path: &Path, table_name: &str) -> Result<ThresholdTable> {
    let df = read_csv(path, false)?;
    ThresholdTable::from_dataframe(&df, table_name)
}

/// Load a two-column (station, zone) membership table.
pub fn read_zone_registry(path: &Path) -> Result<ZoneRegistry> {
    let df = read_csv(path, false)?;
    ZoneRegistry::from_dataframe(&df)
}
