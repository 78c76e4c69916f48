//! Initial queue seeding
//!
//! This module contains the `InitialDistributor`, which places half of the
//! population into random gate queues before the admission desk opens.

use rand::Rng;
use std::fmt;
use tracing::{debug, info, instrument};

use crate::gates::GateRegistry;
use crate::population::Population;
use crate::simulation::error::SimulationResult;
use crate::types::{ArrivalSource, GateId, SerialNumber};

/// Seeds gate queues with randomly drawn people
pub struct InitialDistributor {
    rng: Box<dyn rand::RngCore + Send>,
}

impl fmt::Debug for InitialDistributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitialDistributor").finish()
    }
}

impl InitialDistributor {
    /// Create a distributor with entropy-based randomness
    pub fn new() -> Self {
        use rand::SeedableRng;
        Self { rng: Box::new(rand::rngs::StdRng::from_entropy()) }
    }

    /// Create a distributor with a specific seed for reproducible layouts
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self { rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)) }
    }

    /// Queue `count` people who have not arrived yet into random gates
    ///
    /// Repeatedly draws a serial and, if that person is still outside, a gate.
    /// Seeded people are stamped as arriving at minute zero. Stops early if fewer
    /// than `count` people are left outside. Returns how many were seeded.
    #[instrument(skip(self, population, gates))]
    pub fn distribute(
        &mut self,
        population: &Population,
        gates: &GateRegistry,
        count: usize,
    ) -> SimulationResult<usize> {
        let target = count.min(population.not_arrived().len());
        let mut assigned = 0;

        while assigned < target {
            let serial = SerialNumber(self.rng.gen_range(0..population.len()));
            let outside = population.status(serial).map_or(false, |status| status.is_not_arrived());
            if !outside {
                continue;
            }

            let gate = GateId(self.rng.gen_range(0..gates.len()));
            population.join_queue(serial, gate, 0, ArrivalSource::Seeded)?;
            gates.enqueue(gate, serial)?;
            assigned += 1;
            debug!(%serial, %gate, "Seeded into queue");
        }

        info!("Seeded {} people across {} gates: {:?}", assigned, gates.len(), gates.snapshot_lengths());
        Ok(assigned)
    }
}

impl Default for InitialDistributor {
    fn default() -> Self {
        Self::new()
    }
}
