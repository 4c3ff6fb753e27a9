//! Shared constants for column naming and default processing parameters.

/// Canonical name of the station-identifier column after normalization.
pub const STATION_COL: &str = "station";

/// Canonical name of the timestamp column after normalization.
pub const TIME_COL: &str = "timestamp";

/// Number of leading key columns (station, timestamp) in a readings table.
pub const KEY_COL_COUNT: usize = 2;

/// Pollutant tracked by the zoned alarm summary.
pub const VOCS_POLLUTANT: &str = "VOCs-36";

/// Fixed concentration threshold for the zoned VOCs summary.
pub const VOCS_ALARM_THRESHOLD: f64 = 1000.0;

/// Label of the synthetic totals row in a zoned summary.
pub const TOTAL_ROW_LABEL: &str = "Total";

/// Name of the synthetic per-timestamp zone alarm-count column.
pub const ZONE_TOTAL_COL: &str = "zone_total";

/// Default output directory for result tables.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
