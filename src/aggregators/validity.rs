//! Data-validity statistics: valid-reading counts and validity ratios.

use polars::prelude::*;
use tracing::debug;

use crate::constants::STATION_COL;
use crate::error::Result;

use super::station_rows;

/// Count non-missing readings per (station, pollutant).
///
/// The result has one row per requested station in the given order, even
/// for stations with no rows in the data (those get zeros), and one UInt32
/// column per requested pollutant.
pub fn count_valid(
    data: &DataFrame,
    stations: &[String],
    pollutants: &[String],
) -> Result<DataFrame> {
    let mut counts: Vec<Vec<u32>> = vec![Vec::with_capacity(stations.len()); pollutants.len()];

    for station in stations {
        let rows = station_rows(data, station)?;
        for (slot, pollutant) in counts.iter_mut().zip(pollutants) {
            let column = rows.column(pollutant)?;
            slot.push((column.len() - column.null_count()) as u32);
        }
    }

    debug!(
        "Valid-reading counts computed for {} stations x {} pollutants",
        stations.len(),
        pollutants.len()
    );
    result_frame(stations, pollutants, counts)
}

/// Validity ratio per (station, pollutant): valid count over the station's
/// total row count.
///
/// The denominator is the station's full row count, shared across all
/// pollutant columns. A station with zero rows has no meaningful ratio;
/// its cells are null rather than NaN or an error.
pub fn validity_ratio(
    data: &DataFrame,
    stations: &[String],
    pollutants: &[String],
) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(pollutants.len() + 1);
    columns.push(Column::new(STATION_COL.into(), stations));

    let mut ratios: Vec<Vec<Option<f64>>> =
        vec![Vec::with_capacity(stations.len()); pollutants.len()];

    for station in stations {
        let rows = station_rows(data, station)?;
        let total = rows.height();
        for (slot, pollutant) in ratios.iter_mut().zip(pollutants) {
            let column = rows.column(pollutant)?;
            let valid = column.len() - column.null_count();
            slot.push(if total == 0 {
                None
            } else {
                Some(valid as f64 / total as f64)
            });
        }
    }

    for (pollutant, values) in pollutants.iter().zip(ratios) {
        columns.push(Column::new(pollutant.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

fn result_frame(
    stations: &[String],
    pollutants: &[String],
    counts: Vec<Vec<u32>>,
) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(pollutants.len() + 1);
    columns.push(Column::new(STATION_COL.into(), stations));
    for (pollutant, values) in pollutants.iter().zip(counts) {
        columns.push(Column::new(pollutant.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}
