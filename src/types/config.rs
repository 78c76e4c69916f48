//! Configuration structures for the entry queue simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the population, gates and pacing of the simulation.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Defaults mirroring the fixed parameters of the venue
pub mod defaults {
    /// Total number of people (M)
    pub const POPULATION_SIZE: usize = 10;

    /// Number of entry gates (N)
    pub const GATE_COUNT: usize = 2;

    /// Simulated minutes per queue position (p)
    pub const MINUTES_PER_POSITION: u64 = 1;

    /// Seed for the initial queue distribution
    pub const SEED: u64 = 42;

    /// Real milliseconds per simulated minute (1 second = 1 minute)
    pub const MINUTE_MILLIS: u64 = 1000;

    /// Bias added to internal serials to form 7-digit external serials
    pub const SERIAL_OFFSET: u64 = 1_000_000;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "entry-queue-simulator",
    version = "0.1.0",
    about = "Entry Queue Simulator - Concurrent gate admission with a VIP fast lane",
    long_about = "Simulates admission control at a small number of entry gates. People check in by serial number, are routed to the shortest queue, and a background worker admits one person per gate every simulated minute (1 second = 1 minute).

EXAMPLES:
    # Run with default settings (10 people, 2 gates)
    entry-queue-simulator

    # Feed serials from a file instead of typing them
    entry-queue-simulator < arrivals.txt

    # Larger venue, faster clock
    entry-queue-simulator --population-size 40 --gate-count 4 --minute-millis 250

    # Generate configuration template
    entry-queue-simulator --print-config > venue.json

    # Validate configuration without running
    entry-queue-simulator --config venue.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of people in the population
    #[arg(
        long,
        help = "Number of people (M)",
        long_help = "Total number of people with serial numbers. Must be greater than 0. Default: 10"
    )]
    pub population_size: Option<usize>,

    /// Number of entry gates
    #[arg(
        long,
        help = "Number of gates (N)",
        long_help = "Number of entry gates, each with its own queue. Must be greater than 0. Default: 2"
    )]
    pub gate_count: Option<usize>,

    /// Simulated minutes per queue position
    #[arg(long, help = "Simulated minutes per queue position (p)")]
    pub minutes_per_position: Option<u64>,

    /// Random seed for the initial distribution
    #[arg(long, help = "Random seed for the initial queue distribution")]
    pub seed: Option<u64>,

    /// Real milliseconds per simulated minute
    #[arg(
        long,
        help = "Real milliseconds per simulated minute",
        long_help = "Length of one simulated minute in real milliseconds. Default: 1000 (1 second = 1 minute)"
    )]
    pub minute_millis: Option<u64>,

    /// Output path for the JSON run report
    #[arg(long, help = "Write the final run report as JSON to this path")]
    pub report_output: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of people in the population
    pub population_size: Option<usize>,

    /// Number of entry gates
    pub gate_count: Option<usize>,

    /// Simulated minutes per queue position
    pub minutes_per_position: Option<u64>,

    /// Random seed for the initial distribution
    pub seed: Option<u64>,

    /// Real milliseconds per simulated minute
    pub minute_millis: Option<u64>,

    /// Bias added to internal serials
    pub serial_offset: Option<u64>,

    /// Output path for the JSON run report
    pub report_output: Option<String>,
}

/// Configuration for the entry queue simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of people in the population (M)
    pub population_size: usize,

    /// Number of entry gates (N)
    pub gate_count: usize,

    /// Simulated minutes per queue position (p)
    pub minutes_per_position: u64,

    /// Random seed for the initial distribution
    pub seed: u64,

    /// Real milliseconds per simulated minute
    pub minute_millis: u64,

    /// Bias added to internal serials to form external serials
    pub serial_offset: u64,

    /// Output path for the JSON run report
    pub report_output: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Population size is invalid
    #[error("Population size must be greater than 0, got {0}")]
    InvalidPopulationSize(usize),

    /// Gate count is invalid
    #[error("Gate count must be greater than 0, got {0}")]
    InvalidGateCount(usize),

    /// Minutes per position is invalid
    #[error("Minutes per queue position must be greater than 0, got {0}")]
    InvalidMinutesPerPosition(u64),

    /// Minute length is invalid
    #[error("Simulated minute must last at least 1 ms, got {0}")]
    InvalidMinuteMillis(u64),

    /// Serial offset cannot represent the population
    #[error("Serial offset {offset} cannot represent {population_size} serials")]
    InvalidSerialOffset {
        /// The configured offset
        offset: u64,
        /// The configured population size
        population_size: usize,
    },
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: defaults::POPULATION_SIZE,
            gate_count: defaults::GATE_COUNT,
            minutes_per_position: defaults::MINUTES_PER_POSITION,
            seed: defaults::SEED,
            minute_millis: defaults::MINUTE_MILLIS,
            serial_offset: defaults::SERIAL_OFFSET,
            report_output: None,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            population_size: config_file.population_size.unwrap_or(defaults.population_size),
            gate_count: config_file.gate_count.unwrap_or(defaults.gate_count),
            minutes_per_position: config_file
                .minutes_per_position
                .unwrap_or(defaults.minutes_per_position),
            seed: config_file.seed.unwrap_or(defaults.seed),
            minute_millis: config_file.minute_millis.unwrap_or(defaults.minute_millis),
            serial_offset: config_file.serial_offset.unwrap_or(defaults.serial_offset),
            report_output: config_file.report_output.or(defaults.report_output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.population_size {
            config.population_size = value;
        }
        if let Some(value) = args.gate_count {
            config.gate_count = value;
        }
        if let Some(value) = args.minutes_per_position {
            config.minutes_per_position = value;
        }
        if let Some(value) = args.seed {
            config.seed = value;
        }
        if let Some(value) = args.minute_millis {
            config.minute_millis = value;
        }
        if let Some(value) = args.report_output {
            config.report_output = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.population_size == 0 {
            return Err(ConfigValidationError::InvalidPopulationSize(self.population_size));
        }

        if self.gate_count == 0 {
            return Err(ConfigValidationError::InvalidGateCount(self.gate_count));
        }

        if self.minutes_per_position == 0 {
            return Err(ConfigValidationError::InvalidMinutesPerPosition(
                self.minutes_per_position,
            ));
        }

        if self.minute_millis == 0 {
            return Err(ConfigValidationError::InvalidMinuteMillis(self.minute_millis));
        }

        let fits = i64::try_from(self.serial_offset)
            .ok()
            .and_then(|offset| offset.checked_add(self.population_size as i64))
            .is_some();
        if !fits {
            return Err(ConfigValidationError::InvalidSerialOffset {
                offset: self.serial_offset,
                population_size: self.population_size,
            });
        }

        Ok(())
    }

    /// Real duration of one simulated minute
    pub fn minute_duration(&self) -> Duration {
        Duration::from_millis(self.minute_millis)
    }

    /// Range of external serials accepted at the desk, inclusive
    pub fn external_serial_range(&self) -> (u64, u64) {
        (
            self.serial_offset,
            self.serial_offset + self.population_size.saturating_sub(1) as u64,
        )
    }

    /// Number of people seeded into queues before the desk opens
    pub fn initial_seed_count(&self) -> usize {
        self.population_size / 2
    }

    /// Per-gate queue target once every person is queued
    pub fn gate_target_length(&self) -> usize {
        self.population_size / self.gate_count.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.gate_count, 2);
        assert_eq!(config.minutes_per_position, 1);
        assert_eq!(config.seed, 42);
        assert_eq!(config.minute_millis, 1000);
        assert_eq!(config.serial_offset, 1_000_000);
        assert!(config.report_output.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_loading() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"population_size": 20, "gate_count": 4, "minute_millis": 50}}"#)
            .unwrap();

        let config = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.gate_count, 4);
        assert_eq!(config.minute_millis, 50);
        // Unspecified fields fall back to defaults
        assert_eq!(config.seed, 42);
        assert_eq!(config.minutes_per_position, 1);
    }

    #[test]
    fn test_config_file_missing() {
        let result = SimulationConfig::from_file("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_config_file_unsupported_format() {
        let file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let result = SimulationConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_cli_overrides() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"population_size": 20, "gate_count": 4}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = CliArgs::try_parse_from([
            "test",
            "--config",
            path.as_str(),
            "--gate-count",
            "3",
            "--seed",
            "7",
        ])
        .unwrap();

        let config = SimulationConfig::from_cli_args(args).unwrap();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.gate_count, 3);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_validation_population_size() {
        let config = SimulationConfig { population_size: 0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidPopulationSize(0))
        ));
    }

    #[test]
    fn test_validation_gate_count() {
        let config = SimulationConfig { gate_count: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidGateCount(0))));
    }

    #[test]
    fn test_validation_pacing() {
        let config = SimulationConfig { minutes_per_position: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = SimulationConfig { minute_millis: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidMinuteMillis(0))));
    }

    #[test]
    fn test_validation_serial_offset() {
        let config = SimulationConfig { serial_offset: u64::MAX, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidSerialOffset { .. })
        ));
    }

    #[test]
    fn test_helper_methods() {
        let config = SimulationConfig::default();
        assert_eq!(config.minute_duration(), Duration::from_secs(1));
        assert_eq!(config.external_serial_range(), (1_000_000, 1_000_009));
        assert_eq!(config.initial_seed_count(), 5);
        assert_eq!(config.gate_target_length(), 5);
    }

    #[test]
    fn test_simulation_config_serialization() {
        let config = SimulationConfig::default();
        let json = config.print_json().unwrap();
        assert!(json.contains("population_size"));
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
