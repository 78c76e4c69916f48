//! Gate registry and best-gate selection
//!
//! This module contains the `GateRegistry` that owns every gate queue. All reads
//! that span gates lock them one at a time, never two at once.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::gates::Gate;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::types::{GateId, SerialNumber};

/// Shortest-queue advice shown to a newcomer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRecommendation {
    /// Queue lengths at the time of the snapshot, by gate index
    pub lengths: Vec<usize>,
    /// Smallest length in the snapshot
    pub min_length: usize,
    /// Every gate whose length equals the minimum, lowest index first
    pub gates: Vec<GateId>,
}

impl GateRecommendation {
    /// Build a recommendation from a snapshot of queue lengths
    pub fn from_lengths(lengths: Vec<usize>) -> Self {
        let min_length = lengths.iter().copied().min().unwrap_or(0);
        let gates = lengths
            .iter()
            .enumerate()
            .filter(|&(_, &len)| len == min_length)
            .map(|(index, _)| GateId(index))
            .collect();
        Self { lengths, min_length, gates }
    }

    /// Estimated wait in simulated minutes: `max(1, min_length) * minutes_per_position`
    ///
    /// Saturates at `u64::MAX` instead of overflowing.
    pub fn estimated_wait(&self, minutes_per_position: u64) -> u64 {
        (self.min_length.max(1) as u64).saturating_mul(minutes_per_position)
    }
}

/// All gates of the venue
#[derive(Debug)]
pub struct GateRegistry {
    gates: Vec<Gate>,
}

impl GateRegistry {
    /// Create `count` empty gates
    pub fn new(count: usize) -> Self {
        debug_assert!(count > 0, "a venue needs at least one gate");
        Self { gates: (0..count).map(|index| Gate::new(GateId(index))).collect() }
    }

    /// Number of gates
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether there are no gates
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Look up a gate
    pub fn get(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(id.index())
    }

    /// Iterate over gates in index order
    pub fn iter(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter()
    }

    /// Append a serial to a gate's queue
    pub fn enqueue(&self, id: GateId, serial: SerialNumber) -> SimulationResult<()> {
        let gate = self.get(id).ok_or(SimulationError::UnknownGate(id))?;
        gate.enqueue(serial);
        debug!(%serial, gate = %id, "Enqueued");
        Ok(())
    }

    /// Queue lengths by gate index, each read under that gate's lock in turn
    pub fn snapshot_lengths(&self) -> Vec<usize> {
        self.gates.iter().map(Gate::len).collect()
    }

    /// Queue contents by gate index, front first
    pub fn snapshot_queues(&self) -> Vec<Vec<SerialNumber>> {
        self.gates.iter().map(Gate::contents).collect()
    }

    /// Total number of people waiting across all gates
    pub fn total_queued(&self) -> usize {
        self.snapshot_lengths().iter().sum()
    }

    /// Snapshot lengths and list every gate tied for shortest
    pub fn recommend(&self) -> GateRecommendation {
        GateRecommendation::from_lengths(self.snapshot_lengths())
    }

    /// Gate with the shortest queue right now, ties to the lowest index
    ///
    /// Lengths are read one gate at a time, so under concurrent admission the
    /// answer is advisory.
    #[instrument(skip(self))]
    pub fn find_best_gate(&self) -> GateId {
        let mut best = GateId(0);
        let mut min_len = usize::MAX;

        for gate in &self.gates {
            let len = gate.len();
            if len < min_len {
                min_len = len;
                best = gate.id();
            }
        }

        debug!(gate = %best, length = min_len, "Selected best gate");
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(lengths: &[usize]) -> GateRegistry {
        let registry = GateRegistry::new(lengths.len());
        let mut serial = 0;
        for (index, &len) in lengths.iter().enumerate() {
            for _ in 0..len {
                registry.enqueue(GateId(index), SerialNumber(serial)).unwrap();
                serial += 1;
            }
        }
        registry
    }

    #[test]
    fn test_best_gate_picks_shortest() {
        let registry = registry_with(&[3, 1]);
        assert_eq!(registry.find_best_gate(), GateId(1));
    }

    #[test]
    fn test_best_gate_ties_to_lowest_index() {
        assert_eq!(registry_with(&[2, 2]).find_best_gate(), GateId(0));
        assert_eq!(registry_with(&[4, 1, 1]).find_best_gate(), GateId(1));
        assert_eq!(registry_with(&[0, 0, 0]).find_best_gate(), GateId(0));
    }

    #[test]
    fn test_recommendation_lists_all_ties() {
        let registry = registry_with(&[1, 3, 1]);
        let recommendation = registry.recommend();
        assert_eq!(recommendation.min_length, 1);
        assert_eq!(recommendation.gates, vec![GateId(0), GateId(2)]);
        assert_eq!(recommendation.lengths, vec![1, 3, 1]);
    }

    #[test]
    fn test_estimated_wait_has_one_minute_floor() {
        let empty = GateRecommendation::from_lengths(vec![0, 0]);
        assert_eq!(empty.estimated_wait(1), 1);
        assert_eq!(empty.gates, vec![GateId(0), GateId(1)]);

        let busy = GateRecommendation::from_lengths(vec![4, 3]);
        assert_eq!(busy.estimated_wait(1), 3);
        assert_eq!(busy.estimated_wait(2), 6);
    }

    #[test]
    fn test_estimated_wait_saturates_for_huge_pacing() {
        let recommendation = GateRecommendation::from_lengths(vec![2, 3]);
        assert_eq!(recommendation.estimated_wait(u64::MAX), u64::MAX);
        assert_eq!(recommendation.estimated_wait(u64::MAX / 2), u64::MAX - 1);
    }

    #[test]
    fn test_enqueue_unknown_gate() {
        let registry = GateRegistry::new(2);
        assert!(matches!(
            registry.enqueue(GateId(5), SerialNumber(1)),
            Err(SimulationError::UnknownGate(GateId(5)))
        ));
        assert_eq!(registry.total_queued(), 0);
    }
}
