//! Simulation orchestration and control
//!
//! This module contains the shared venue state, the admission worker, the
//! simulated clock and the orchestrator that sequences a run.
//!
//! # Overview
//!
//! - **SimulationOrchestrator**: seeds, balances, runs the desk and drains the queues
//! - **VenueState**: population, gates, counter and clock shared across threads
//! - **AdmissionWorker**: admits one person per gate per simulated minute
//! - **CompletionCounter**: tracks non-VIP admissions and signals the drain
//! - **SimulatedClock**: maps real time to simulated minutes
//! - **SimulationReport**: wait metrics and run summary
//! - **SimulationError**: error handling for simulation operations
//!
//! # Usage Example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use entry_queue_simulator::simulation::*;
//! use entry_queue_simulator::types::*;
//!
//! let config = SimulationConfig { minute_millis: 5, ..Default::default() };
//! let mut orchestrator = SimulationOrchestrator::new(config).unwrap();
//!
//! let mut output = Vec::new();
//! let report = orchestrator.run(Cursor::new("1000005\n"), &mut output).unwrap();
//! assert_eq!(report.session.interactive_arrivals, 1);
//! assert_eq!(orchestrator.state().status_counts().entered, 10);
//! ```

pub mod clock;
pub mod counter;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod state;
pub mod statistics;
pub mod worker;

// Re-export all public types for convenience
pub use clock::*;
pub use counter::*;
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use state::*;
pub use statistics::*;
pub use worker::*;
