//! Command execution: logging setup, pipeline invocation, and reporting.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cli::args::{Args, Commands, ProcessArgs, ValidateArgs};
use crate::error::{Result, VocsError};
use crate::models::check_severity_invariant;
use crate::pipeline::{Pipeline, RunStats};
use crate::reader::{read_threshold_table, read_zone_registry};

/// Dispatch the parsed arguments to their command.
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;

    debug!("Command line arguments: {:?}", args);

    match args.command {
        Some(Commands::Process(process_args)) => run_process(process_args).await,
        Some(Commands::Validate(validate_args)) => run_validate(validate_args).await,
        None => Ok(()), // main prints the help screen before reaching here
    }
}

async fn run_process(args: ProcessArgs) -> Result<()> {
    let config = args.to_config();
    info!(
        "Processing period '{}' from {} readings table(s)",
        config.period,
        config.inputs.len()
    );

    tokio::fs::create_dir_all(&config.output_dir).await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("static spinner template is valid"),
    );
    spinner.set_message(format!("Computing statistics for {}", config.period));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let pipeline = Pipeline::new(config);
    let result = tokio::task::spawn_blocking(move || pipeline.run())
        .await
        .map_err(|e| VocsError::configuration(format!("pipeline task failed: {}", e)))?;
    spinner.finish_and_clear();

    let stats = result?;
    report_stats(&stats);

    if stats.is_success() {
        Ok(())
    } else {
        Err(VocsError::configuration(format!(
            "{} of {} output tables failed",
            stats.failures.len(),
            stats.failures.len() + stats.tables_written.len()
        )))
    }
}

async fn run_validate(args: ValidateArgs) -> Result<()> {
    let level_2 = read_threshold_table(&args.level_2, "level-2")?;
    let level_3 = read_threshold_table(&args.level_3, "level-3")?;
    check_severity_invariant(&level_2, &level_3)?;

    for entry in level_2.entries() {
        if !level_3.contains(&entry.pollutant) {
            warn!(
                "Pollutant '{}' has a level-2 threshold but no level-3 threshold",
                entry.pollutant
            );
        }
    }

    let registry = read_zone_registry(&args.zones)?;

    println!("{}", "Configuration is consistent".bright_green().bold());
    println!(
        "  {} level-2 thresholds, {} level-3 thresholds",
        level_2.len(),
        level_3.len()
    );
    for zone in registry.zones() {
        println!("  zone '{}': {} station(s)", zone.name, zone.stations.len());
    }
    Ok(())
}

fn report_stats(stats: &RunStats) {
    println!("{}", "Processing complete".bright_green().bold());
    println!(
        "  {} rows merged, {} stations, {} pollutants, {:.2}s",
        stats.merged_rows,
        stats.stations,
        stats.pollutants,
        stats.processing_time.as_secs_f64()
    );
    println!("  {} table(s) written:", stats.tables_written.len());
    for (table, path) in &stats.tables_written {
        println!("    {} -> {}", table, path.display());
    }
    if !stats.failures.is_empty() {
        println!(
            "{}",
            format!("  {} table(s) failed:", stats.failures.len())
                .bright_red()
                .bold()
        );
        for (table, reason) in &stats.failures {
            println!("    {}: {}", table.bright_red(), reason);
        }
    }
}

/// Configure tracing output from the verbosity flags.
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vocs_processor={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| VocsError::configuration(format!("failed to initialize logging: {}", e)))?;

    Ok(())
}
