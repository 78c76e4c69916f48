//! Shared venue state
//!
//! Everything the admission desk and the worker thread both touch.
//!
//! Lock order is transitions (shared) -> gate -> person. A census takes the
//! transitions lock exclusively, so it never sees a person halfway between a
//! record update and the matching queue update.

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::gates::GateRegistry;
use crate::population::{Population, StatusCounts};
use crate::simulation::clock::SimulatedClock;
use crate::simulation::counter::CompletionCounter;
use crate::types::{GateId, SimulationConfig};

/// Head count taken while no transition is in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    /// People sitting in gate queues, by queue length
    pub in_gates: usize,
    /// People whose record says queued
    pub queued: usize,
    /// People inside the venue
    pub entered: usize,
    /// People who have not arrived
    pub not_arrived: usize,
}

impl Census {
    /// Whether queue lengths plus entered plus not-arrived equals `population_size`
    /// and the queues agree with the records
    pub fn is_conserved(&self, population_size: usize) -> bool {
        self.in_gates == self.queued
            && self.in_gates + self.entered + self.not_arrived == population_size
    }
}

/// Population, gates, counter and clock for one run
#[derive(Debug)]
pub struct VenueState {
    /// Configuration the state was built from
    pub config: SimulationConfig,
    /// Every person record
    pub population: Population,
    /// Every gate queue
    pub gates: GateRegistry,
    /// Non-VIP admissions so far
    pub counter: CompletionCounter,
    /// Simulated minute source
    pub clock: SimulatedClock,
    transitions: RwLock<()>,
}

impl VenueState {
    /// Build the population and gates and start the clock
    pub fn new(config: SimulationConfig) -> Self {
        let population = Population::new(config.population_size);
        let gates = GateRegistry::new(config.gate_count);
        let counter = CompletionCounter::with_vips(config.population_size, population.vip_count());
        let clock = SimulatedClock::start(config.minute_duration());

        info!(
            "Venue ready: {} people, {} gates, drain target {}",
            population.len(),
            gates.len(),
            counter.target()
        );

        Self { config, population, gates, counter, clock, transitions: RwLock::new(()) }
    }

    /// Hold off censuses while moving a person between a record and a queue
    ///
    /// Must be taken before any gate or person lock and never twice on one thread.
    pub fn hold_transitions(&self) -> RwLockReadGuard<'_, ()> {
        self.transitions.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count queues and records at one instant
    ///
    /// Waits for in-flight transitions to finish and blocks new ones while
    /// counting. Gates are still read one at a time.
    pub fn census(&self) -> Census {
        let _exclusive = self.transitions.write().unwrap_or_else(PoisonError::into_inner);
        let counts = self.population.status_counts();
        Census {
            in_gates: self.gates.total_queued(),
            queued: counts.queued,
            entered: counts.entered,
            not_arrived: counts.not_arrived,
        }
    }

    /// Head count by status
    pub fn status_counts(&self) -> StatusCounts {
        self.population.status_counts()
    }

    /// Whether queue contents and person records agree
    ///
    /// Every queued serial must be recorded as queued at that gate, and every
    /// queued person must appear in exactly one queue. Safe to call while the
    /// worker and desk are running.
    pub fn is_consistent(&self) -> bool {
        let _exclusive = self.transitions.write().unwrap_or_else(PoisonError::into_inner);
        let queues = self.gates.snapshot_queues();
        let in_queues: usize = queues.iter().map(Vec::len).sum();

        let records_match = queues.iter().enumerate().all(|(index, queue)| {
            queue.iter().all(|&serial| {
                self.population.status(serial).and_then(|status| status.assigned_gate())
                    == Some(GateId(index))
            })
        });

        records_match && in_queues == self.status_counts().queued
    }
}
