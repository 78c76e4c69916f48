//! Population modeling
//!
//! This module contains everything about the fixed set of people who may enter
//! the venue.
//!
//! # Overview
//!
//! - **VipClassifier**: decides who bypasses the queues
//! - **Person**: per-serial status and arrival/entry timestamps
//! - **Population**: the arena of all person records, initialized with VIPs inside
//!
//! # Usage Example
//!
//! ```rust
//! use entry_queue_simulator::population::*;
//! use entry_queue_simulator::types::*;
//!
//! let population = Population::new(10);
//! assert_eq!(population.vip_count(), 1);
//! assert_eq!(population.status(SerialNumber(0)), Some(PersonStatus::Entered));
//! assert_eq!(population.status(SerialNumber(5)), Some(PersonStatus::NotArrived));
//! ```

pub mod classifier;
pub mod person;
pub mod registry;

// Re-export all public types for convenience
pub use classifier::VipClassifier;
pub use person::Person;
pub use registry::{Population, StatusCounts};
