//! Zone-partitioned alarm summary for a single pollutant.
//!
//! Pivots one pollutant's readings into a time x station matrix of
//! binarized exceedances, restricted to one zone's stations, with a
//! per-timestamp total column, a synthetic totals row, and suppression of
//! alarm-free timestamps.

use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::constants::{STATION_COL, TIME_COL, TOTAL_ROW_LABEL, ZONE_TOTAL_COL};
use crate::error::{Result, VocsError};
use crate::models::ZoneRegistry;

/// Summarize one pollutant's alarms for one zone.
///
/// Rows are the distinct timestamps of `data` in table order plus a
/// synthetic totals row; columns are the zone's stations (registry order)
/// plus a zone-total column.
///
/// Cells are filled by (station, timestamp) key, never by row position: a
/// pair absent from the data stays 0, and duplicate pairs each classify
/// independently and accumulate into their cell. A reading alarms iff its
/// value is strictly above `threshold`; missing readings compare as 0 and
/// never alarm.
///
/// Timestamps whose zone total is 0 are dropped, the totals row included,
/// so an alarm-free period produces an empty table.
pub fn summarize_zone(
    data: &DataFrame,
    pollutant: &str,
    threshold: f64,
    zone: &str,
    registry: &ZoneRegistry,
) -> Result<DataFrame> {
    let zone_stations = registry.stations_in(zone)?;

    if !data.get_column_names_str().iter().any(|c| *c == pollutant) {
        return Err(VocsError::missing_column("merged readings", pollutant));
    }

    let stations = data.column(STATION_COL)?.str()?;
    let timestamps = data.column(TIME_COL)?.str()?;
    let values = data.column(pollutant)?.cast(&DataType::Float64)?;
    let values = values.f64()?;

    // Row axis: distinct timestamps in table order.
    let mut time_index: HashMap<&str, usize> = HashMap::new();
    let mut time_labels: Vec<&str> = Vec::new();
    for ts in timestamps.into_iter().flatten() {
        if !time_index.contains_key(ts) {
            time_index.insert(ts, time_labels.len());
            time_labels.push(ts);
        }
    }

    let station_index: HashMap<&str, usize> = zone_stations
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    // Binarized time x station matrix for the zone.
    let mut matrix = vec![vec![0u32; zone_stations.len()]; time_labels.len()];
    for ((station, ts), value) in stations
        .into_iter()
        .zip(timestamps.into_iter())
        .zip(values.into_iter())
    {
        let (Some(station), Some(ts)) = (station, ts) else {
            continue;
        };
        let Some(&col) = station_index.get(station) else {
            continue; // station outside this zone
        };
        let row = time_index[ts];
        if value.unwrap_or(0.0) > threshold {
            matrix[row][col] += 1;
        }
    }

    let row_totals: Vec<u32> = matrix.iter().map(|row| row.iter().sum()).collect();
    let column_totals: Vec<u32> = (0..zone_stations.len())
        .map(|col| matrix.iter().map(|row| row[col]).sum())
        .collect();
    let grand_total: u32 = column_totals.iter().sum();

    // Alarm-free timestamps are suppressed; the totals row obeys the same
    // rule, so a fully alarm-free period yields an empty table.
    let kept: Vec<usize> = (0..time_labels.len())
        .filter(|&row| row_totals[row] > 0)
        .collect();
    let keep_total_row = grand_total > 0;

    debug!(
        "Zone '{}': {} of {} timestamps with alarms, {} alarms total",
        zone,
        kept.len(),
        time_labels.len(),
        grand_total
    );

    let mut labels: Vec<String> = kept.iter().map(|&row| time_labels[row].to_string()).collect();
    if keep_total_row {
        labels.push(TOTAL_ROW_LABEL.to_string());
    }

    let mut columns: Vec<Column> = Vec::with_capacity(zone_stations.len() + 2);
    columns.push(Column::new(TIME_COL.into(), labels));

    for (col, station) in zone_stations.iter().enumerate() {
        let mut cells: Vec<u32> = kept.iter().map(|&row| matrix[row][col]).collect();
        if keep_total_row {
            cells.push(column_totals[col]);
        }
        columns.push(Column::new(station.as_str().into(), cells));
    }

    let mut totals: Vec<u32> = kept.iter().map(|&row| row_totals[row]).collect();
    if keep_total_row {
        totals.push(grand_total);
    }
    columns.push(Column::new(ZONE_TOTAL_COL.into(), totals));

    Ok(DataFrame::new(columns)?)
}
