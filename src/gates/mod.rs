//! Entry gates and queue management
//!
//! This module contains the gate queues and every operation that places people
//! into them.
//!
//! # Overview
//!
//! - **Gate**: a FIFO queue of serials behind its own lock
//! - **GateRegistry**: all gates, snapshots and best-gate selection
//! - **InitialDistributor**: seeds half the population into random gates
//! - **LoadBalancer**: one-shot rebalancing toward equal queue lengths
//!
//! No operation here ever holds two gate locks at once.
//!
//! # Usage Example
//!
//! ```rust
//! use entry_queue_simulator::gates::*;
//! use entry_queue_simulator::population::Population;
//!
//! let population = Population::new(10);
//! let gates = GateRegistry::new(2);
//!
//! InitialDistributor::with_seed(42).distribute(&population, &gates, 5).unwrap();
//! let report = LoadBalancer::new().rebalance(&population, &gates).unwrap();
//! assert!(report.spread() <= 1);
//!
//! let best = gates.find_best_gate();
//! assert!(best.index() < gates.len());
//! ```

pub mod balancer;
pub mod distributor;
pub mod gate;
pub mod registry;

// Re-export all public types for convenience
pub use balancer::{BalanceReport, LoadBalancer};
pub use distributor::InitialDistributor;
pub use gate::Gate;
pub use registry::{GateRecommendation, GateRegistry};
