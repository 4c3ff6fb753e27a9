//! Tests for the zone-partitioned alarm summary.

use polars::prelude::*;

use crate::aggregators::summarize_zone;
use crate::constants::{STATION_COL, TIME_COL, ZONE_TOTAL_COL};
use crate::error::VocsError;
use crate::models::ZoneRegistry;

fn registry(pairs: &[(&str, &str)]) -> ZoneRegistry {
    let stations: Vec<&str> = pairs.iter().map(|(s, _)| *s).collect();
    let zones: Vec<&str> = pairs.iter().map(|(_, z)| *z).collect();
    let df = df!("station" => stations, "zone" => zones).unwrap();
    ZoneRegistry::from_dataframe(&df).unwrap()
}

/// Three timestamps, two stations, threshold 1000:
/// values [[500, 1500], [2000, 900], [800, 800]] binarize to
/// [[0, 1], [1, 0], [0, 0]]; the alarm-free third hour is dropped and the
/// totals row reads [1, 1] with grand total 2.
#[test]
fn reference_scenario() {
    let data = df!(
        STATION_COL => ["a", "b", "a", "b", "a", "b"],
        TIME_COL => ["01:00", "01:00", "02:00", "02:00", "03:00", "03:00"],
        "VOCs-36" => [500.0, 1500.0, 2000.0, 900.0, 800.0, 800.0],
    )
    .unwrap();
    let zones = registry(&[("a", "park"), ("b", "park")]);

    let result = summarize_zone(&data, "VOCs-36", 1000.0, "park", &zones).unwrap();

    assert_eq!(
        result.get_column_names_str(),
        vec![TIME_COL, "a", "b", ZONE_TOTAL_COL]
    );
    let labels: Vec<Option<&str>> = result
        .column(TIME_COL)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(labels, vec![Some("01:00"), Some("02:00"), Some("Total")]);

    let a = result.column("a").unwrap().u32().unwrap();
    let b = result.column("b").unwrap().u32().unwrap();
    let totals = result.column(ZONE_TOTAL_COL).unwrap().u32().unwrap();
    assert_eq!(a.get(0), Some(0));
    assert_eq!(b.get(0), Some(1));
    assert_eq!(a.get(1), Some(1));
    assert_eq!(b.get(1), Some(0));
    assert_eq!(totals.get(0), Some(1));
    assert_eq!(totals.get(1), Some(1));
    // totals row
    assert_eq!(a.get(2), Some(1));
    assert_eq!(b.get(2), Some(1));
    assert_eq!(totals.get(2), Some(2));
}

#[test]
fn unknown_zone_is_a_reported_error() {
    let data = df!(
        STATION_COL => ["a"],
        TIME_COL => ["01:00"],
        "VOCs-36" => [1500.0],
    )
    .unwrap();
    let zones = registry(&[("a", "park")]);

    let err = summarize_zone(&data, "VOCs-36", 1000.0, "北京", &zones).unwrap_err();
    assert!(matches!(err, VocsError::UnknownZone { ref zone, .. } if zone == "北京"));
}

#[test]
fn columns_restrict_to_the_requested_zone() {
    let data = df!(
        STATION_COL => ["a", "b", "c"],
        TIME_COL => ["01:00", "01:00", "01:00"],
        "VOCs-36" => [1500.0, 1500.0, 1500.0],
    )
    .unwrap();
    let zones = registry(&[("a", "east"), ("b", "east"), ("c", "west")]);

    let result = summarize_zone(&data, "VOCs-36", 1000.0, "west", &zones).unwrap();
    assert_eq!(
        result.get_column_names_str(),
        vec![TIME_COL, "c", ZONE_TOTAL_COL]
    );
    let totals = result.column(ZONE_TOTAL_COL).unwrap().u32().unwrap();
    assert_eq!(totals.get(0), Some(1)); // only c's alarm counts for west
}

#[test]
fn missing_pairs_stay_zero_instead_of_shifting() {
    // station b has no 02:00 reading at all; its 03:00 alarm must land on
    // 03:00, not slide into the 02:00 slot
    let data = df!(
        STATION_COL => ["a", "b", "a", "a", "b"],
        TIME_COL => ["01:00", "01:00", "02:00", "03:00", "03:00"],
        "VOCs-36" => [500.0, 600.0, 700.0, 800.0, 1500.0],
    )
    .unwrap();
    let zones = registry(&[("a", "park"), ("b", "park")]);

    let result = summarize_zone(&data, "VOCs-36", 1000.0, "park", &zones).unwrap();
    let labels: Vec<Option<&str>> = result
        .column(TIME_COL)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(labels, vec![Some("03:00"), Some("Total")]);

    let b = result.column("b").unwrap().u32().unwrap();
    assert_eq!(b.get(0), Some(1));
}

#[test]
fn duplicate_pairs_accumulate_independently() {
    let data = df!(
        STATION_COL => ["a", "a"],
        TIME_COL => ["01:00", "01:00"],
        "VOCs-36" => [1500.0, 2000.0],
    )
    .unwrap();
    let zones = registry(&[("a", "park")]);

    let result = summarize_zone(&data, "VOCs-36", 1000.0, "park", &zones).unwrap();
    let a = result.column("a").unwrap().u32().unwrap();
    assert_eq!(a.get(0), Some(2));
}

#[test]
fn alarm_free_period_yields_an_empty_table() {
    let data = df!(
        STATION_COL => ["a", "a"],
        TIME_COL => ["01:00", "02:00"],
        "VOCs-36" => [100.0, 200.0],
    )
    .unwrap();
    let zones = registry(&[("a", "park")]);

    let result = summarize_zone(&data, "VOCs-36", 1000.0, "park", &zones).unwrap();
    assert_eq!(result.height(), 0);
    assert_eq!(
        result.get_column_names_str(),
        vec![TIME_COL, "a", ZONE_TOTAL_COL]
    );
}

#[test]
fn missing_readings_compare_as_non_alarms() {
    let data = df!(
        STATION_COL => ["a", "a"],
        TIME_COL => ["01:00", "02:00"],
        "VOCs-36" => [Some(1500.0), None],
    )
    .unwrap();
    let zones = registry(&[("a", "park")]);

    let result = summarize_zone(&data, "VOCs-36", 1000.0, "park", &zones).unwrap();
    let a = result.column("a").unwrap().u32().unwrap();
    // only the 01:00 alarm row plus totals survive
    assert_eq!(result.height(), 2);
    assert_eq!(a.get(0), Some(1));
    assert_eq!(a.get(1), Some(1));
}

#[test]
fn zone_station_absent_from_data_gets_a_zero_column() {
    let data = df!(
        STATION_COL => ["a"],
        TIME_COL => ["01:00"],
        "VOCs-36" => [1500.0],
    )
    .unwrap();
    let zones = registry(&[("a", "park"), ("ghost", "park")]);

    let result = summarize_zone(&data, "VOCs-36", 1000.0, "park", &zones).unwrap();
    let ghost = result.column("ghost").unwrap().u32().unwrap();
    assert_eq!(ghost.get(0), Some(0));
    assert_eq!(ghost.get(1), Some(0)); // totals row
}
