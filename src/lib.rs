//! Entry Queue Simulator
//!
//! A concurrent admission simulator for a venue with a handful of entry gates,
//! a fixed population of ticket holders and a VIP fast lane.
//!
//! # Overview
//!
//! Time is simulated at one real second per minute by default. Half of the
//! population is seeded into random gate queues, the queues are rebalanced once,
//! and then two threads run side by side: a background worker that admits the
//! front person of every gate each simulated minute, and an interactive desk
//! that validates serial numbers and sends newcomers to the shortest queue.
//! When input ends, everyone still outside is swept into a queue and the run
//! finishes once the last person is through.
//!
//! ## Key Features
//!
//! - **VIP fast lane**: VIPs are admitted at minute zero and never queue
//! - **Shortest-queue assignment**: with every tied gate shown as a recommendation
//! - **One-shot rebalancing**: seeded queues differ by at most one person
//! - **Per-gate locking**: no operation ever holds two gate locks
//! - **Run report**: wait metrics and counts, optionally written as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Cursor;
//! use entry_queue_simulator::*;
//!
//! let config = SimulationConfig { minute_millis: 5, ..Default::default() };
//! let mut orchestrator = SimulationOrchestrator::new(config)?;
//!
//! let mut prompts = Vec::new();
//! let report = orchestrator.run(Cursor::new("1000005 1000005\n"), &mut prompts)?;
//! println!("Average wait: {} minutes", report.metrics.average_wait);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, status enums and configuration
//! - [`population`]: person records and VIP classification
//! - [`gates`]: gate queues, seeding, rebalancing and best-gate selection
//! - [`admission`]: the interactive desk and its input stream
//! - [`simulation`]: worker thread, clock, orchestration and reporting
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │ Population  │    │   Gates     │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Person      │◄───┤ Registry    │
//! │ Enums       │    │ Classifier  │    │ Distributor │
//! │ Config      │    │             │    │ Balancer    │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                            ▲                   ▲
//!                            │                   │
//!                    ┌─────────────┐    ┌─────────────┐
//!                    │  Admission  │    │ Simulation  │
//!                    │             │    │             │
//!                    │ Desk        │◄───┤ Orchestrator│
//!                    │ Session     │    │ Worker      │
//!                    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod admission;
pub mod gates;
pub mod population;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ArrivalSource,
    ConfigValidationError,
    // Identifiers
    GateId,
    // Enums
    PersonStatus,
    RunId,
    SerialNumber,
    // Configuration
    SimulationConfig,
};

// Population
pub use population::{Person, Population, VipClassifier};

// Gates
pub use gates::{GateRecommendation, GateRegistry, InitialDistributor, LoadBalancer};

// Admission desk
pub use admission::{Admission, AdmissionDesk, QueueTicket};

// Simulation types and functionality
pub use simulation::{
    AdmissionError, AdmissionWorker, SimulationError, SimulationOrchestrator, SimulationReport,
    VenueState, WaitMetrics,
};
