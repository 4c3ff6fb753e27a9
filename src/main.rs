use clap::Parser;
use std::process;
use vocs_processor::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("VOCs Processor - Air-Quality Alarm Statistics");
    println!("=============================================");
    println!();
    println!("Merge hourly pollutant readings from monitoring stations and compute");
    println!("data-validity metrics, two-tier alarm counts, and per-zone VOCs summaries.");
    println!();
    println!("USAGE:");
    println!("    vocs-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Run the full statistics pipeline over one period's readings");
    println!("    validate    Check threshold tables and zone membership for consistency");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Full run over two readings tables:");
    println!("    vocs-processor process --input vocs.csv gases.csv \\");
    println!("                           --level2 level2_limits.csv --level3 level3_limits.csv \\");
    println!("                           --zones zones.csv --period 2021-06");
    println!();
    println!("    # Check configuration only:");
    println!("    vocs-processor validate --level2 level2_limits.csv \\");
    println!("                            --level3 level3_limits.csv --zones zones.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    vocs-processor <COMMAND> --help");
}
