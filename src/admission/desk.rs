//! Admission desk
//!
//! Handles one serial at a time: validation, the re-entry and duplicate-queue
//! checks, VIP walk-ins and shortest-queue assignment for everyone else.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::gates::GateRecommendation;
use crate::simulation::error::{AdmissionError, SimulationResult};
use crate::simulation::state::VenueState;
use crate::types::{ArrivalSource, GateId, PersonStatus, SerialNumber};

/// What the desk told a newcomer who was sent to a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTicket {
    /// Person queued
    pub serial: SerialNumber,
    /// Simulated minute of arrival
    pub arrival_minute: u64,
    /// Estimated wait in simulated minutes
    pub estimated_wait: u64,
    /// Gate lengths and the gates tied for shortest at the time of the first snapshot
    pub recommendation: GateRecommendation,
    /// Gate actually assigned
    ///
    /// Chosen from a second read of the queue lengths, so it may not be one of
    /// the recommended gates if the queues moved in between.
    pub assigned: GateId,
}

/// Outcome of a successful admission request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Admission {
    /// A VIP walked straight in
    VipEntry {
        /// Person admitted
        serial: SerialNumber,
        /// Simulated minute of entry
        minute: u64,
    },
    /// A regular arrival joined a queue
    Queued(QueueTicket),
}

impl Admission {
    /// Serial the outcome refers to
    pub fn serial(&self) -> SerialNumber {
        match self {
            Admission::VipEntry { serial, .. } => *serial,
            Admission::Queued(ticket) => ticket.serial,
        }
    }
}

/// Front desk that turns serials into queue assignments
#[derive(Debug, Clone)]
pub struct AdmissionDesk {
    state: Arc<VenueState>,
}

impl AdmissionDesk {
    /// Create a desk over shared venue state
    pub fn new(state: Arc<VenueState>) -> Self {
        Self { state }
    }

    /// Map an external serial onto the population
    pub fn resolve(&self, raw: i64) -> Result<SerialNumber, AdmissionError> {
        let config = &self.state.config;
        SerialNumber::from_external(raw, config.serial_offset, config.population_size).ok_or_else(
            || {
                let (min, max) = config.external_serial_range();
                AdmissionError::OutOfRange { input: raw, min, max }
            },
        )
    }

    /// Admit from a text token
    pub fn admit_token(&self, token: &str) -> Result<Admission, AdmissionError> {
        let raw = token
            .trim()
            .parse::<i64>()
            .map_err(|_| AdmissionError::Malformed(token.to_string()))?;
        self.admit_external(raw)
    }

    /// Admit from an external serial number
    pub fn admit_external(&self, raw: i64) -> Result<Admission, AdmissionError> {
        let serial = self.resolve(raw)?;
        self.admit(serial)
    }

    /// Admit a person already known to be in range
    ///
    /// Checks run in order: already entered, already queued, VIP, then regular
    /// arrival. Rejections change no state.
    #[instrument(skip(self))]
    pub fn admit(&self, serial: SerialNumber) -> Result<Admission, AdmissionError> {
        let state = &self.state;
        let _transition = state.hold_transitions();
        let status = state
            .population
            .status(serial)
            .ok_or_else(|| AdmissionError::Internal(format!("{} has no record", serial)))?;
        debug!(%serial, %status, "Checking in");

        match status {
            PersonStatus::Entered => return Err(AdmissionError::AlreadyEntered(serial)),
            PersonStatus::Queued { gate } => {
                return Err(AdmissionError::AlreadyQueued { serial, gate });
            }
            PersonStatus::NotArrived => {}
        }

        if state.population.is_vip(serial) {
            let minute = state.clock.current_minute();
            let source = ArrivalSource::VipWalkIn;
            state.population.admit_directly(serial, minute, source)?;
            info!(%serial, minute, %source, "VIP admitted at the desk");
            return Ok(Admission::VipEntry { serial, minute });
        }

        let arrival_minute = state.clock.current_minute();
        let recommendation = state.gates.recommend();
        let estimated_wait = recommendation.estimated_wait(state.config.minutes_per_position);
        let assigned = state.gates.find_best_gate();

        // The person lock is released before the gate lock is taken.
        state.population.join_queue(serial, assigned, arrival_minute, ArrivalSource::Interactive)?;
        state.gates.enqueue(assigned, serial)?;

        debug!(
            %serial,
            gate = %assigned,
            estimated_wait,
            recommended = ?recommendation.gates,
            "Queued arrival"
        );

        Ok(Admission::Queued(QueueTicket {
            serial,
            arrival_minute,
            estimated_wait,
            recommendation,
            assigned,
        }))
    }

    /// Force-assign everyone who never arrived to the shortest queue
    ///
    /// Returns each swept serial with the gate it was sent to.
    #[instrument(skip(self))]
    pub fn sweep_remaining(&self) -> SimulationResult<Vec<(SerialNumber, GateId)>> {
        let state = &self.state;
        let mut swept = Vec::new();

        for serial in state.population.not_arrived() {
            let _transition = state.hold_transitions();
            let now = state.clock.current_minute();
            let gate = state.gates.find_best_gate();
            state.population.join_queue(serial, gate, now, ArrivalSource::DrainSweep)?;
            state.gates.enqueue(gate, serial)?;
            debug!(%serial, %gate, source = %ArrivalSource::DrainSweep, "Queued by sweep");
            swept.push((serial, gate));
        }

        info!("Drain sweep assigned {} remaining people", swept.len());
        Ok(swept)
    }
}
