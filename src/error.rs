//! Error handling for alarm-statistics processing.
//!
//! Provides error types with context for input loading, threshold
//! configuration, zone lookup, and aggregation failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input table not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Column '{column}' not present in table '{table}'")]
    MissingColumn { table: String, column: String },

    #[error("Table at {path} is malformed: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    #[error("Unknown zone '{zone}' (known zones: {known})")]
    UnknownZone { zone: String, known: String },

    #[error("Station '{station}' is assigned to both zone '{first}' and zone '{second}'")]
    DuplicateZoneAssignment {
        station: String,
        first: String,
        second: String,
    },

    #[error(
        "Severity invariant violated for pollutant '{pollutant}': \
         level-3 threshold {level_3} exceeds level-2 threshold {level_2}"
    )]
    SeverityInvariant {
        pollutant: String,
        level_2: f64,
        level_3: f64,
    },

    #[error(
        "Negative alarm count for station '{station}', pollutant '{pollutant}': \
         level-3 count {level_3} < level-2 count {level_2}; threshold tables are inconsistent"
    )]
    NegativeAlarmCount {
        station: String,
        pollutant: String,
        level_2: i64,
        level_3: i64,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl VocsError {
    /// Create a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing-column error.
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VocsError>;
