//! Population registry
//!
//! This module contains the `Population` arena: one record per serial, each behind
//! its own lock so that exactly one actor transitions a given person at a time.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::population::{Person, VipClassifier};
use crate::simulation::error::PersonTransitionError;
use crate::types::{ArrivalSource, GateId, PersonStatus, SerialNumber};

/// Head count by lifecycle status at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// People who have not arrived
    pub not_arrived: usize,
    /// People waiting in a gate queue
    pub queued: usize,
    /// People inside the venue
    pub entered: usize,
}

impl StatusCounts {
    /// Total number of people counted
    pub fn total(&self) -> usize {
        self.not_arrived + self.queued + self.entered
    }
}

/// Fixed-size arena of person records indexed by serial
#[derive(Debug)]
pub struct Population {
    people: Vec<Mutex<Person>>,
    classifier: VipClassifier,
    vip_count: usize,
}

impl Population {
    /// Create the population, admitting every VIP at minute zero
    #[instrument]
    pub fn new(size: usize) -> Self {
        let classifier = VipClassifier::new(size);
        let mut vip_count = 0;

        let people = (0..size)
            .map(|index| {
                let serial = SerialNumber(index);
                let is_vip = classifier.is_vip(serial);
                let mut person = Person::new(serial, is_vip);
                if is_vip {
                    vip_count += 1;
                    let admitted = person.admit_directly(0, ArrivalSource::VipPreAdmitted);
                    debug_assert!(admitted.is_ok(), "fresh record rejected admission: {admitted:?}");
                    debug!(%serial, "VIP admitted at simulation start");
                }
                Mutex::new(person)
            })
            .collect();

        info!(
            "Initialized population of {} ({} VIPs, divisor {})",
            size,
            vip_count,
            classifier.divisor()
        );

        Self { people, classifier, vip_count }
    }

    /// Number of people
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the population is empty
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Number of people classified VIP at initialization
    pub fn vip_count(&self) -> usize {
        self.vip_count
    }

    /// The classifier in use
    pub fn classifier(&self) -> &VipClassifier {
        &self.classifier
    }

    /// Check whether a serial belongs to a VIP
    pub fn is_vip(&self, serial: SerialNumber) -> bool {
        self.classifier.is_vip(serial)
    }

    /// Copy of one person's record
    pub fn person(&self, serial: SerialNumber) -> Option<Person> {
        self.people.get(serial.index()).map(|slot| lock(slot).clone())
    }

    /// Current status of one person
    pub fn status(&self, serial: SerialNumber) -> Option<PersonStatus> {
        self.people.get(serial.index()).map(|slot| lock(slot).status)
    }

    /// Copy of every record, in serial order
    ///
    /// Records are locked one at a time, so under concurrent admission this is
    /// not a single atomic view.
    pub fn snapshot(&self) -> Vec<Person> {
        self.people.iter().map(|slot| lock(slot).clone()).collect()
    }

    /// Serials of everyone who has not arrived, in serial order
    pub fn not_arrived(&self) -> Vec<SerialNumber> {
        self.people
            .iter()
            .map(lock)
            .filter(|person| person.status.is_not_arrived())
            .map(|person| person.serial)
            .collect()
    }

    /// Head count by status
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for slot in &self.people {
            match lock(slot).status {
                PersonStatus::NotArrived => counts.not_arrived += 1,
                PersonStatus::Queued { .. } => counts.queued += 1,
                PersonStatus::Entered => counts.entered += 1,
            }
        }
        counts
    }

    /// Transition a person into a gate queue
    ///
    /// Only updates the record; the caller pushes the serial onto the gate queue
    /// afterwards without holding this person's lock.
    pub fn join_queue(
        &self,
        serial: SerialNumber,
        gate: GateId,
        now: u64,
        source: ArrivalSource,
    ) -> Result<(), PersonTransitionError> {
        self.with_person(serial, |person| person.join_queue(gate, now, source))
    }

    /// Admit a person directly, bypassing every queue
    pub fn admit_directly(
        &self,
        serial: SerialNumber,
        now: u64,
        source: ArrivalSource,
    ) -> Result<(), PersonTransitionError> {
        self.with_person(serial, |person| person.admit_directly(now, source))
    }

    /// Mark a person popped from `gate` as entered
    ///
    /// Called while the gate lock is held; lock order is always gate then person.
    pub fn enter_from(
        &self,
        serial: SerialNumber,
        gate: GateId,
        now: u64,
    ) -> Result<(), PersonTransitionError> {
        self.with_person(serial, |person| person.enter_from(gate, now))
    }

    /// Re-point a queued person after the balancer moved them between gates
    ///
    /// Called while the receiving gate's lock is held.
    pub fn move_gate(
        &self,
        serial: SerialNumber,
        from: GateId,
        to: GateId,
    ) -> Result<(), PersonTransitionError> {
        self.with_person(serial, |person| person.move_gate(from, to))
    }

    fn with_person<R>(
        &self,
        serial: SerialNumber,
        f: impl FnOnce(&mut Person) -> Result<R, PersonTransitionError>,
    ) -> Result<R, PersonTransitionError> {
        let slot =
            self.people.get(serial.index()).ok_or(PersonTransitionError::UnknownSerial(serial))?;
        let mut person = lock(slot);
        f(&mut person)
    }
}

// A panic while a record was locked leaves the record itself consistent, since
// every transition assigns fields only after its checks pass.
fn lock(slot: &Mutex<Person>) -> MutexGuard<'_, Person> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
