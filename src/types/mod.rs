//! Core types and identifiers for the entry queue simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: dense serial and gate indices, plus a UUID run identifier
//! - **Enums**: person lifecycle status and arrival sources
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use entry_queue_simulator::types::*;
//!
//! let serial = SerialNumber::from_external(1_000_005, 1_000_000, 10).unwrap();
//! assert_eq!(serial, SerialNumber(5));
//!
//! let status = PersonStatus::Queued { gate: GateId(0) };
//! assert_eq!(status.to_string(), "Queued at Gate 1");
//!
//! let config = SimulationConfig {
//!     population_size: 20,
//!     gate_count: 4,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
