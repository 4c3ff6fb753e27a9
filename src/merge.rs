//! Merging readings tables and extracting pollutant subsets.
//!
//! Source tables each carry a disjoint set of pollutant columns for the
//! same station/timestamp grid. They are combined with a full join on the
//! (station, timestamp) keys, never by row position, so a table with a
//! missing or extra hour cannot shift another table's readings.

use polars::prelude::*;
use tracing::debug;

use crate::constants::{KEY_COL_COUNT, STATION_COL, TIME_COL};
use crate::error::{Result, VocsError};

/// Merge normalized readings tables into one wide table.
///
/// Keys are coalesced, and the result is sorted by timestamp then station
/// so downstream output is deterministic regardless of join order.
pub fn merge_readings(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut iter = frames.into_iter();
    let first = iter.next().ok_or_else(|| {
        VocsError::configuration("at least one readings table is required")
    })?;

    let mut merged = first.lazy();
    for frame in iter {
        merged = merged.join(
            frame.lazy(),
            [col(STATION_COL), col(TIME_COL)],
            [col(STATION_COL), col(TIME_COL)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        );
    }

    let merged = merged
        .sort([TIME_COL, STATION_COL], SortMultipleOptions::default())
        .collect()?;

    debug!(
        "Merged readings: {} rows x {} columns",
        merged.height(),
        merged.width()
    );
    Ok(merged)
}

/// Pollutant columns of a merged table, in table order.
pub fn pollutant_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names_str()
        .iter()
        .skip(KEY_COL_COUNT)
        .map(|s| s.to_string())
        .collect()
}

/// Distinct station names in first-appearance order.
pub fn station_list(df: &DataFrame) -> Result<Vec<String>> {
    let stations = df.column(STATION_COL)?.str()?;
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for station in stations.into_iter().flatten() {
        if seen.insert(station) {
            out.push(station.to_string());
        }
    }
    Ok(out)
}

/// Select the key columns plus the named pollutant columns.
///
/// A pollutant absent from the table is an error, not a silently narrower
/// extract.
pub fn extract_subset(df: &DataFrame, pollutants: &[String]) -> Result<DataFrame> {
    let present = df.get_column_names_str();
    for pollutant in pollutants {
        if !present.iter().any(|c| c == pollutant) {
            return Err(VocsError::missing_column("merged readings", pollutant));
        }
    }

    let mut selection: Vec<String> = vec![STATION_COL.to_string(), TIME_COL.to_string()];
    selection.extend(pollutants.iter().cloned());
    Ok(df.select(selection)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocs_frame() -> DataFrame {
        df!(
            STATION_COL => ["s1", "s1", "s2", "s2"],
            TIME_COL => ["01:00", "02:00", "01:00", "02:00"],
            "VOCs-36" => [100.0, 200.0, 300.0, 400.0],
        )
        .unwrap()
    }

    fn gases_frame() -> DataFrame {
        df!(
            STATION_COL => ["s1", "s1", "s2", "s2"],
            TIME_COL => ["01:00", "02:00", "01:00", "02:00"],
            "H2S" => [1.0, 2.0, 3.0, 4.0],
            "NH3" => [10.0, 20.0, 30.0, 40.0],
        )
        .unwrap()
    }

    #[test]
    fn merge_joins_on_station_and_time() {
        let merged = merge_readings(vec![vocs_frame(), gases_frame()]).unwrap();
        assert_eq!(merged.height(), 4);
        assert_eq!(
            pollutant_columns(&merged),
            vec!["VOCs-36", "H2S", "NH3"]
        );
    }

    #[test]
    fn merge_keeps_unmatched_rows_from_both_sides() {
        // gases table is missing s2@02:00 and has an extra hour
        let gases = df!(
            STATION_COL => ["s1", "s1", "s2", "s1"],
            TIME_COL => ["01:00", "02:00", "01:00", "03:00"],
            "H2S" => [1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let merged = merge_readings(vec![vocs_frame(), gases]).unwrap();
        assert_eq!(merged.height(), 5);

        // the gap stays null instead of shifting a later reading upward
        let h2s = merged.column("H2S").unwrap();
        assert_eq!(h2s.null_count(), 1);
    }

    #[test]
    fn extract_subset_preserves_keys_and_order() {
        let merged = merge_readings(vec![vocs_frame(), gases_frame()]).unwrap();
        let subset =
            extract_subset(&merged, &["NH3".to_string(), "H2S".to_string()]).unwrap();
        assert_eq!(
            subset.get_column_names_str(),
            vec![STATION_COL, TIME_COL, "NH3", "H2S"]
        );
    }

    #[test]
    fn extract_subset_rejects_unknown_pollutant() {
        let merged = merge_readings(vec![vocs_frame()]).unwrap();
        let err = extract_subset(&merged, &["SO2".to_string()]).unwrap_err();
        assert!(matches!(err, VocsError::MissingColumn { .. }));
    }

    #[test]
    fn station_list_orders_by_first_appearance() {
        let stations = station_list(&vocs_frame()).unwrap();
        assert_eq!(stations, vec!["s1", "s2"]);
    }
}
