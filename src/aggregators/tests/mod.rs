//! Aggregator unit tests.

mod zoned_tests;

use polars::prelude::*;

use crate::constants::{STATION_COL, TIME_COL};

/// Two stations, three hours, two pollutants, with two missing readings.
pub fn sample_readings() -> DataFrame {
    df!(
        STATION_COL => ["s1", "s1", "s1", "s2", "s2", "s2"],
        TIME_COL => ["01:00", "02:00", "03:00", "01:00", "02:00", "03:00"],
        "NH3" => [Some(50.0), None, Some(250.0), Some(10.0), Some(20.0), Some(30.0)],
        "H2S" => [Some(1.0), Some(2.0), Some(3.0), None, Some(15.0), Some(5.0)],
    )
    .unwrap()
}

pub fn stations(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
