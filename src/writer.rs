//! Persisting result tables.

use polars::prelude::{CsvWriter, ParquetWriter as PolarsParquetWriter, SerWriter};
use polars::prelude::{DataFrame, ParquetCompression};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::config::OutputFormat;
use crate::error::Result;

/// Write one result table to `path` in the requested format.
pub fn persist_table(mut df: DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    match format {
        OutputFormat::Csv => {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
        }
        OutputFormat::Parquet => {
            PolarsParquetWriter::new(&mut file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)?;
        }
    }

    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
