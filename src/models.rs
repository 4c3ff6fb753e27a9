//! Core domain structures for alarm-statistics processing.
//!
//! Defines ordered pollutant threshold tables, the severity invariant
//! between the two alarm tiers, and explicit station-to-zone membership.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VocsError};

/// One pollutant with its alarm concentration threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub pollutant: String,
    pub threshold: f64,
}

/// Ordered mapping from pollutant name to alarm threshold.
///
/// Order matters: result tables carry their pollutant columns in the same
/// order as the source threshold table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    entries: Vec<ThresholdEntry>,
}

impl ThresholdTable {
    pub fn new(entries: Vec<ThresholdEntry>) -> Self {
        Self { entries }
    }

    /// Build from a two-column frame: first column pollutant name, second
    /// column numeric threshold. Column names are irrelevant, position is
    /// the contract.
    pub fn from_dataframe(df: &DataFrame, table_name: &str) -> Result<Self> {
        let columns = df.get_columns();
        if columns.len() < 2 {
            return Err(VocsError::configuration(format!(
                "threshold table '{}' needs a pollutant and a threshold column, found {}",
                table_name,
                columns.len()
            )));
        }

        let names = columns[0].cast(&DataType::String)?;
        let names = names.str()?;
        let values = columns[1].cast(&DataType::Float64)?;
        let values = values.f64()?;

        let mut entries = Vec::with_capacity(df.height());
        for (name, value) in names.into_iter().zip(values.into_iter()) {
            match (name, value) {
                (Some(name), Some(value)) => entries.push(ThresholdEntry {
                    pollutant: name.to_string(),
                    threshold: value,
                }),
                _ => {
                    return Err(VocsError::configuration(format!(
                        "threshold table '{}' has a row with a missing pollutant or threshold",
                        table_name
                    )));
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ThresholdEntry] {
        &self.entries
    }

    /// Pollutant names in table order.
    pub fn pollutants(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.pollutant.clone()).collect()
    }

    pub fn get(&self, pollutant: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.pollutant == pollutant)
            .map(|e| e.threshold)
    }

    pub fn contains(&self, pollutant: &str) -> bool {
        self.get(pollutant).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check that for every pollutant present in both tiers the level-3
/// threshold does not exceed the level-2 threshold.
///
/// Level-2 is the stricter, higher bar; a level-3 threshold above it would
/// make the level-3-minus-level-2 subtraction go negative.
pub fn check_severity_invariant(level_2: &ThresholdTable, level_3: &ThresholdTable) -> Result<()> {
    for entry in level_2.entries() {
        if let Some(loose) = level_3.get(&entry.pollutant)
            && loose > entry.threshold
        {
            return Err(VocsError::SeverityInvariant {
                pollutant: entry.pollutant.clone(),
                level_2: entry.threshold,
                level_3: loose,
            });
        }
    }
    Ok(())
}

/// A named geographic grouping of stations, in membership-table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub stations: Vec<String>,
}

/// Explicit station-to-zone membership.
///
/// Replaces positional station-list slicing: membership survives station
/// reordering and additions, and an unknown zone is a hard error instead of
/// an unsliced table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Build from a two-column frame: first column station name, second
    /// column zone name. Zone and station order follow first appearance.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let columns = df.get_columns();
        if columns.len() < 2 {
            return Err(VocsError::configuration(format!(
                "zone membership table needs a station and a zone column, found {}",
                columns.len()
            )));
        }

        let stations = columns[0].cast(&DataType::String)?;
        let stations = stations.str()?;
        let zone_names = columns[1].cast(&DataType::String)?;
        let zone_names = zone_names.str()?;

        let mut registry = Self { zones: Vec::new() };
        for (station, zone) in stations.into_iter().zip(zone_names.into_iter()) {
            let (Some(station), Some(zone)) = (station, zone) else {
                return Err(VocsError::configuration(
                    "zone membership table has a row with a missing station or zone",
                ));
            };
            registry.assign(station, zone)?;
        }

        Ok(registry)
    }

    fn assign(&mut self, station: &str, zone: &str) -> Result<()> {
        // One zone per station; a second assignment is a config error.
        if let Some(existing) = self.zone_of(station) {
            return Err(VocsError::DuplicateZoneAssignment {
                station: station.to_string(),
                first: existing.to_string(),
                second: zone.to_string(),
            });
        }

        match self.zones.iter_mut().find(|z| z.name == zone) {
            Some(z) => z.stations.push(station.to_string()),
            None => self.zones.push(Zone {
                name: zone.to_string(),
                stations: vec![station.to_string()],
            }),
        }
        Ok(())
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zone names in first-appearance order.
    pub fn zone_names(&self) -> Vec<String> {
        self.zones.iter().map(|z| z.name.clone()).collect()
    }

    pub fn zone_of(&self, station: &str) -> Option<&str> {
        self.zones
            .iter()
            .find(|z| z.stations.iter().any(|s| s == station))
            .map(|z| z.name.as_str())
    }

    /// Ordered station list for a zone, or `UnknownZone` naming the zones
    /// that do exist.
    pub fn stations_in(&self, zone: &str) -> Result<&[String]> {
        self.zones
            .iter()
            .find(|z| z.name == zone)
            .map(|z| z.stations.as_slice())
            .ok_or_else(|| VocsError::UnknownZone {
                zone: zone.to_string(),
                known: self.zone_names().join(", "),
            })
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
