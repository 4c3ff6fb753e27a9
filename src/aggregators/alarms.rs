//! Threshold-exceedance ("alarm") counting.

use polars::prelude::*;
use tracing::debug;

use crate::constants::STATION_COL;
use crate::error::{Result, VocsError};
use crate::models::ThresholdTable;

use super::station_rows;

/// Count readings strictly above threshold per (station, pollutant).
///
/// A missing reading is taken as 0 before the comparison, so it never
/// alarms and never trips the comparison. This intentionally under-reports
/// relative to the validity counter's missing-data handling; the two
/// semantics serve different analyses and stay separate.
///
/// Columns follow the threshold table's pollutant order. The comparison is
/// strict: a reading exactly at the threshold is not an alarm.
pub fn count_alarms(
    data: &DataFrame,
    stations: &[String],
    thresholds: &ThresholdTable,
) -> Result<DataFrame> {
    let mut counts: Vec<Vec<u32>> =
        vec![Vec::with_capacity(stations.len()); thresholds.len()];

    for station in stations {
        let rows = station_rows(data, station)?;
        for (slot, entry) in counts.iter_mut().zip(thresholds.entries()) {
            let values = rows.column(&entry.pollutant)?.cast(&DataType::Float64)?;
            let values = values.f64()?;
            let alarms = values
                .into_iter()
                .filter(|v| v.unwrap_or(0.0) > entry.threshold)
                .count();
            slot.push(alarms as u32);
        }
    }

    debug!(
        "Alarm counts computed for {} stations against {} thresholds",
        stations.len(),
        thresholds.len()
    );

    let mut columns: Vec<Column> = Vec::with_capacity(thresholds.len() + 1);
    columns.push(Column::new(STATION_COL.into(), stations));
    for (entry, values) in thresholds.entries().iter().zip(counts) {
        columns.push(Column::new(entry.pollutant.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Reduce level-3 alarm counts to the level-3-only band.
///
/// For every pollutant that also has a level-2 threshold, a level-3 count
/// includes the level-2 alarms (the level-3 threshold is the lower bar).
/// Subtracting the level-2 count leaves alarms strictly inside the level-3
/// band. A negative difference means the threshold tables are inconsistent
/// and is surfaced, never clamped.
pub fn level_3_exclusive(
    level_3_counts: &DataFrame,
    level_2_counts: &DataFrame,
) -> Result<DataFrame> {
    let stations = level_3_counts.column(STATION_COL)?.str()?;
    let stations_2 = level_2_counts.column(STATION_COL)?.str()?;
    let aligned = stations.len() == stations_2.len()
        && stations
            .into_iter()
            .zip(stations_2.into_iter())
            .all(|(a, b)| a == b);
    if !aligned {
        return Err(VocsError::configuration(
            "level-2 and level-3 alarm tables cover different station sets",
        ));
    }

    let level_2_names = level_2_counts.get_column_names_str();
    let mut result = level_3_counts.clone();

    for name in level_3_counts.get_column_names_str() {
        if name == STATION_COL || !level_2_names.contains(&name) {
            continue;
        }

        let loose = level_3_counts.column(name)?.u32()?;
        let strict = level_2_counts.column(name)?.u32()?;

        let mut adjusted: Vec<u32> = Vec::with_capacity(loose.len());
        for (idx, (l3, l2)) in loose.into_iter().zip(strict.into_iter()).enumerate() {
            let l3 = l3.unwrap_or(0) as i64;
            let l2 = l2.unwrap_or(0) as i64;
            if l3 < l2 {
                let station = stations
                    .get(idx)
                    .unwrap_or("<unknown>")
                    .to_string();
                return Err(VocsError::NegativeAlarmCount {
                    station,
                    pollutant: name.to_string(),
                    level_2: l2,
                    level_3: l3,
                });
            }
            adjusted.push((l3 - l2) as u32);
        }

        result.with_column(Column::new(name.into(), adjusted))?;
    }

    Ok(result)
}
