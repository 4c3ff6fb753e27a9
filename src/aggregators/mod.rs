//! Aggregation core: pure transforms from a readings table to result tables.
//!
//! Every function here takes the readings frame by shared reference and
//! returns a freshly built frame; no aggregator mutates its input, so they
//! compose and re-run without hidden state.
//!
//! Missing-value semantics differ by aggregator and deliberately so:
//! validity counting excludes missing readings, while alarm counting treats
//! a missing reading as zero so it can never alarm. Do not unify them.

pub mod alarms;
pub mod validity;
pub mod zoned;

#[cfg(test)]
pub mod tests;

pub use alarms::{count_alarms, level_3_exclusive};
pub use validity::{count_valid, validity_ratio};
pub use zoned::summarize_zone;

use polars::prelude::*;

use crate::constants::STATION_COL;
use crate::error::Result;

/// Rows of `data` belonging to one station.
///
/// A station with no rows yields an empty frame, which every aggregator
/// must handle (zero counts, null ratios) rather than skip or fail.
pub(crate) fn station_rows(data: &DataFrame, station: &str) -> Result<DataFrame> {
    let mask = data.column(STATION_COL)?.str()?.equal(station);
    Ok(data.filter(&mask)?)
}
