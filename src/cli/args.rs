//! Command-line argument definitions.
//!
//! Defines the CLI interface using the clap derive API. All paths and the
//! period label are per-run arguments; nothing is read from module-level
//! state or config files.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{self, OutputFormat, RunConfig, VocsConfig};
use crate::constants::{DEFAULT_OUTPUT_DIR, VOCS_ALARM_THRESHOLD, VOCS_POLLUTANT};

/// CLI arguments for the VOCs alarm-statistics processor.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vocs-processor",
    version,
    about = "Compute data-validity and pollutant alarm statistics from hourly station readings",
    long_about = "Merges hourly pollutant readings from multiple monitoring stations into one \
                  wide table and derives per-station statistics: valid-reading counts, validity \
                  ratios, two-tier threshold-exceedance counts, and zone-partitioned VOCs alarm \
                  summaries."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all but warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Args {
    /// Log level derived from the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full statistics pipeline over one period's readings
    Process(ProcessArgs),
    /// Check threshold tables and zone membership without touching readings
    Validate(ValidateArgs),
}

/// Output format choice on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

/// Arguments for the process command.
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Raw readings tables to merge (station, timestamp, pollutant columns;
    /// units row under the header)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        required = true,
        num_args = 1..
    )]
    pub inputs: Vec<PathBuf>,

    /// Level-2 (stricter tier) threshold table
    #[arg(long = "level2", value_name = "PATH")]
    pub level_2: PathBuf,

    /// Level-3 (looser tier) threshold table
    #[arg(long = "level3", value_name = "PATH")]
    pub level_3: PathBuf,

    /// Station-to-zone membership table
    #[arg(long = "zones", value_name = "PATH")]
    pub zones: PathBuf,

    /// Directory result tables are written into
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output: PathBuf,

    /// Period label prefixed to output file names (defaults to the current month)
    #[arg(short = 'p', long = "period", value_name = "LABEL")]
    pub period: Option<String>,

    /// Pollutant column for the zoned alarm summary
    #[arg(long = "vocs-column", value_name = "NAME", default_value = VOCS_POLLUTANT)]
    pub vocs_column: String,

    /// Fixed alarm threshold for the zoned summary
    #[arg(long = "vocs-threshold", value_name = "VALUE", default_value_t = VOCS_ALARM_THRESHOLD)]
    pub vocs_threshold: f64,

    /// Output table format
    #[arg(long = "format", value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,
}

impl ProcessArgs {
    /// Build the run configuration from the parsed arguments.
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            inputs: self.inputs.clone(),
            level_2_path: self.level_2.clone(),
            level_3_path: self.level_3.clone(),
            zones_path: self.zones.clone(),
            output_dir: self.output.clone(),
            period: self
                .period
                .clone()
                .unwrap_or_else(config::default_period),
            vocs: VocsConfig {
                pollutant: self.vocs_column.clone(),
                threshold: self.vocs_threshold,
            },
            format: self.format.into(),
        }
    }
}

/// Arguments for the validate command.
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Level-2 threshold table
    #[arg(long = "level2", value_name = "PATH")]
    pub level_2: PathBuf,

    /// Level-3 threshold table
    #[arg(long = "level3", value_name = "PATH")]
    pub level_3: PathBuf,

    /// Station-to-zone membership table
    #[arg(long = "zones", value_name = "PATH")]
    pub zones: PathBuf,
}
