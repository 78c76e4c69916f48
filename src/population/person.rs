//! Per-person admission record
//!
//! This module contains the `Person` record and its forward-only status transitions.

use serde::{Deserialize, Serialize};

use crate::simulation::error::PersonTransitionError;
use crate::types::{ArrivalSource, GateId, PersonStatus, SerialNumber};

/// Admission record for one serial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Internal serial of this person
    pub serial: SerialNumber,
    /// Whether the classifier marked this person as VIP
    pub is_vip: bool,
    /// Current lifecycle status
    pub status: PersonStatus,
    /// Simulated minute the person arrived, if they have
    pub arrival_time: Option<u64>,
    /// Simulated minute the person entered, if they have
    pub entry_time: Option<u64>,
    /// How the person reached the venue
    pub arrival_source: Option<ArrivalSource>,
}

impl Person {
    /// Create a record for someone who has not arrived yet
    pub fn new(serial: SerialNumber, is_vip: bool) -> Self {
        Self {
            serial,
            is_vip,
            status: PersonStatus::NotArrived,
            arrival_time: None,
            entry_time: None,
            arrival_source: None,
        }
    }

    /// Admit straight into the venue, stamping arrival and entry together
    pub fn admit_directly(
        &mut self,
        now: u64,
        source: ArrivalSource,
    ) -> Result<(), PersonTransitionError> {
        self.ensure_not_arrived()?;
        self.status = PersonStatus::Entered;
        self.arrival_time = Some(now);
        self.entry_time = Some(now);
        self.arrival_source = Some(source);
        Ok(())
    }

    /// Record arrival and assignment to a gate queue
    pub fn join_queue(
        &mut self,
        gate: GateId,
        now: u64,
        source: ArrivalSource,
    ) -> Result<(), PersonTransitionError> {
        self.ensure_not_arrived()?;
        self.status = PersonStatus::Queued { gate };
        self.arrival_time = Some(now);
        self.arrival_source = Some(source);
        Ok(())
    }

    /// Record entry after being popped from `gate`
    pub fn enter_from(&mut self, gate: GateId, now: u64) -> Result<(), PersonTransitionError> {
        match self.status {
            PersonStatus::Queued { gate: assigned } if assigned == gate => {
                self.status = PersonStatus::Entered;
                // Entry is never stamped before arrival, even if the clock reading
                // was taken before the arrival stamp landed.
                let arrival = self.arrival_time.unwrap_or(0);
                self.entry_time = Some(now.max(arrival));
                Ok(())
            }
            PersonStatus::Queued { gate: assigned } => Err(PersonTransitionError::GateMismatch {
                serial: self.serial,
                expected: assigned,
                actual: gate,
            }),
            PersonStatus::Entered => Err(PersonTransitionError::AlreadyEntered(self.serial)),
            PersonStatus::NotArrived => Err(PersonTransitionError::NotQueued(self.serial)),
        }
    }

    /// Re-point a queued person from one gate to another
    pub fn move_gate(&mut self, from: GateId, to: GateId) -> Result<(), PersonTransitionError> {
        match self.status {
            PersonStatus::Queued { gate } if gate == from => {
                self.status = PersonStatus::Queued { gate: to };
                Ok(())
            }
            PersonStatus::Queued { gate } => Err(PersonTransitionError::GateMismatch {
                serial: self.serial,
                expected: gate,
                actual: from,
            }),
            PersonStatus::Entered => Err(PersonTransitionError::AlreadyEntered(self.serial)),
            PersonStatus::NotArrived => Err(PersonTransitionError::NotQueued(self.serial)),
        }
    }

    /// Minutes spent between arrival and entry, once both are known
    pub fn wait_minutes(&self) -> Option<u64> {
        match (self.arrival_time, self.entry_time) {
            (Some(arrival), Some(entry)) => Some(entry.saturating_sub(arrival)),
            _ => None,
        }
    }

    fn ensure_not_arrived(&self) -> Result<(), PersonTransitionError> {
        match self.status {
            PersonStatus::NotArrived => Ok(()),
            PersonStatus::Queued { gate } => {
                Err(PersonTransitionError::AlreadyQueued { serial: self.serial, gate })
            }
            PersonStatus::Entered => Err(PersonTransitionError::AlreadyEntered(self.serial)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_person_has_no_timestamps() {
        let person = Person::new(SerialNumber(3), false);
        assert_eq!(person.status, PersonStatus::NotArrived);
        assert!(person.arrival_time.is_none());
        assert!(person.entry_time.is_none());
        assert!(person.wait_minutes().is_none());
    }

    #[test]
    fn test_queue_then_enter() {
        let mut person = Person::new(SerialNumber(3), false);
        person.join_queue(GateId(1), 2, ArrivalSource::Interactive).unwrap();
        assert_eq!(person.status, PersonStatus::Queued { gate: GateId(1) });
        assert_eq!(person.arrival_time, Some(2));

        person.enter_from(GateId(1), 5).unwrap();
        assert_eq!(person.status, PersonStatus::Entered);
        assert_eq!(person.entry_time, Some(5));
        assert_eq!(person.wait_minutes(), Some(3));
    }

    #[test]
    fn test_entered_is_terminal() {
        let mut person = Person::new(SerialNumber(0), true);
        person.admit_directly(0, ArrivalSource::VipPreAdmitted).unwrap();
        let before = person.clone();

        assert!(matches!(
            person.join_queue(GateId(0), 4, ArrivalSource::Interactive),
            Err(PersonTransitionError::AlreadyEntered(_))
        ));
        assert!(person.admit_directly(4, ArrivalSource::VipWalkIn).is_err());
        assert!(person.enter_from(GateId(0), 4).is_err());
        assert_eq!(person, before);
    }

    #[test]
    fn test_cannot_requeue() {
        let mut person = Person::new(SerialNumber(4), false);
        person.join_queue(GateId(0), 1, ArrivalSource::Interactive).unwrap();
        assert!(matches!(
            person.join_queue(GateId(1), 2, ArrivalSource::Interactive),
            Err(PersonTransitionError::AlreadyQueued { gate: GateId(0), .. })
        ));
    }

    #[test]
    fn test_enter_from_wrong_gate_is_rejected() {
        let mut person = Person::new(SerialNumber(4), false);
        person.join_queue(GateId(0), 1, ArrivalSource::Seeded).unwrap();
        assert!(matches!(
            person.enter_from(GateId(1), 2),
            Err(PersonTransitionError::GateMismatch { .. })
        ));
        assert!(person.status.is_queued());
    }

    #[test]
    fn test_move_gate_keeps_arrival() {
        let mut person = Person::new(SerialNumber(6), false);
        person.join_queue(GateId(0), 0, ArrivalSource::Seeded).unwrap();
        person.move_gate(GateId(0), GateId(1)).unwrap();
        assert_eq!(person.status, PersonStatus::Queued { gate: GateId(1) });
        assert_eq!(person.arrival_time, Some(0));
        assert!(person.move_gate(GateId(0), GateId(1)).is_err());
    }

    #[test]
    fn test_entry_never_precedes_arrival() {
        let mut person = Person::new(SerialNumber(2), false);
        person.join_queue(GateId(0), 7, ArrivalSource::DrainSweep).unwrap();
        person.enter_from(GateId(0), 6).unwrap();
        assert_eq!(person.entry_time, Some(7));
        assert_eq!(person.wait_minutes(), Some(0));
    }
}
