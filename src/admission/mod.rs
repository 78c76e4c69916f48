//! Interactive admission
//!
//! This module contains the front desk that people talk to once the venue is
//! open.
//!
//! # Overview
//!
//! - **AdmissionDesk**: validates serials and queues or admits people
//! - **SerialReader**: whitespace-token reader over any `BufRead`
//! - **AdmissionSession**: prompt/response loop over an input stream
//! - **console**: the text shown to people at the desk
//!
//! # Usage Example
//!
//! ```rust
//! use std::io::Cursor;
//! use std::sync::Arc;
//!
//! use entry_queue_simulator::admission::*;
//! use entry_queue_simulator::simulation::VenueState;
//! use entry_queue_simulator::types::SimulationConfig;
//!
//! let state = Arc::new(VenueState::new(SimulationConfig::default()));
//! let desk = AdmissionDesk::new(state);
//!
//! let mut out = Vec::new();
//! let tally = AdmissionSession::new(&desk).run(Cursor::new("1000005\n"), &mut out).unwrap();
//! assert_eq!(tally.interactive_arrivals, 1);
//! ```

pub mod console;
pub mod desk;
pub mod input;
pub mod session;

// Re-export all public types for convenience
pub use desk::{Admission, AdmissionDesk, QueueTicket};
pub use input::SerialReader;
pub use session::{AdmissionSession, SessionTally};
