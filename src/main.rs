// Entry Queue Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/entry-queue-simulator
// ```
//
// Or with a faster clock and a JSON report:
//
// ```console
// $ ./target/release/entry-queue-simulator --minute-millis 100 --report-output run.json --verbose
// ```

use std::fs;
use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use entry_queue_simulator::simulation::{LoggingConfig, SimulationOrchestrator, SimulationReport};
use entry_queue_simulator::types::config::CliArgs;
use entry_queue_simulator::types::SimulationConfig;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::init_default()
    };

    let _logging_guard = match logging {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Entry Queue Simulator");

    if let Err(e) = run(args) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Entry Queue Simulator completed successfully");
}

fn run(args: CliArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let verbose = args.verbose || args.debug;

    let config =
        SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    if verbose {
        print_configuration_summary(&config);
    }

    let mut orchestrator =
        SimulationOrchestrator::new(config.clone()).context("Failed to initialize simulation")?;
    info!("Run {} initialized", orchestrator.run_id());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    let report =
        orchestrator.run(stdin.lock(), &mut output).context("Simulation run did not complete")?;
    output.flush().context("Failed to flush output")?;

    if verbose {
        eprintln!("{}", report.detailed_breakdown());
    }

    if let Some(path) = &config.report_output {
        write_report(&report, path)?;
        info!("Run report written to: {}", path);
        eprintln!("Run report written to: {}", path);
    }

    Ok(())
}

/// Write the run report as pretty JSON
fn write_report(report: &SimulationReport, path: &str) -> Result<()> {
    let json = report.to_json().context("Failed to serialize run report")?;
    fs::write(path, json).with_context(|| format!("Failed to write run report to '{}'", path))
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    let (min, max) = config.external_serial_range();
    eprintln!("Configuration:");
    eprintln!("  Population Size: {}", config.population_size);
    eprintln!("  Gate Count: {}", config.gate_count);
    eprintln!("  Minutes per Queue Position: {}", config.minutes_per_position);
    eprintln!("  Simulated Minute: {} ms", config.minute_millis);
    eprintln!("  Serial Range: {} - {}", min, max);
    eprintln!("  Random Seed: {}", config.seed);
    eprintln!("  Initially Seeded: {}", config.initial_seed_count());
    eprintln!("  Target Queue Length: {}", config.gate_target_length());
    if let Some(path) = &config.report_output {
        eprintln!("  Report Output: {}", path);
    }
    eprintln!();
}
