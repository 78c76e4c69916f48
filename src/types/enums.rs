//! Enumeration types for the entry queue simulator
//!
//! This module contains the person lifecycle status and the ways a person can
//! arrive at the venue.

use crate::types::GateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a person
///
/// Transitions only move forward: `NotArrived -> Queued -> Entered`, or
/// `NotArrived -> Entered` for VIPs. `Entered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonStatus {
    /// Has not shown up at any gate yet
    NotArrived,
    /// Waiting in the queue of the given gate
    Queued {
        /// Gate whose queue holds this person
        gate: GateId,
    },
    /// Inside the venue
    Entered,
}

impl PersonStatus {
    /// Check if the person is inside the venue
    pub fn is_entered(&self) -> bool {
        matches!(self, PersonStatus::Entered)
    }

    /// Check if the person is waiting in some queue
    pub fn is_queued(&self) -> bool {
        matches!(self, PersonStatus::Queued { .. })
    }

    /// Check if the person has not arrived yet
    pub fn is_not_arrived(&self) -> bool {
        matches!(self, PersonStatus::NotArrived)
    }

    /// The gate holding this person, if queued
    pub fn assigned_gate(&self) -> Option<GateId> {
        match self {
            PersonStatus::Queued { gate } => Some(*gate),
            _ => None,
        }
    }
}

impl fmt::Display for PersonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonStatus::NotArrived => write!(f, "Not Arrived"),
            PersonStatus::Queued { gate } => write!(f, "Queued at {}", gate),
            PersonStatus::Entered => write!(f, "Entered"),
        }
    }
}

/// How a person came to be at the venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrivalSource {
    /// Pre-admitted VIP at simulation start
    VipPreAdmitted,
    /// Seeded into a queue by the initial distributor
    Seeded,
    /// Checked in through the interactive admission desk
    Interactive,
    /// Late VIP admitted through the interactive desk
    VipWalkIn,
    /// Force-assigned by the end-of-input drain sweep
    DrainSweep,
}

impl fmt::Display for ArrivalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalSource::VipPreAdmitted => write!(f, "VIP Pre-Admitted"),
            ArrivalSource::Seeded => write!(f, "Seeded"),
            ArrivalSource::Interactive => write!(f, "Interactive"),
            ArrivalSource::VipWalkIn => write!(f, "VIP Walk-In"),
            ArrivalSource::DrainSweep => write!(f, "Drain Sweep"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        let queued = PersonStatus::Queued { gate: GateId(1) };
        assert!(queued.is_queued());
        assert_eq!(queued.assigned_gate(), Some(GateId(1)));
        assert!(PersonStatus::Entered.is_entered());
        assert!(PersonStatus::NotArrived.is_not_arrived());
        assert_eq!(PersonStatus::Entered.assigned_gate(), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PersonStatus::Queued { gate: GateId(0) }.to_string(), "Queued at Gate 1");
        assert_eq!(PersonStatus::NotArrived.to_string(), "Not Arrived");
    }
}
