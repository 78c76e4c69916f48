//! One-shot queue rebalancing
//!
//! Runs once after seeding and before the admission worker starts. Gates are
//! locked one at a time in both passes.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::gates::GateRegistry;
use crate::population::Population;
use crate::simulation::error::SimulationResult;
use crate::types::{GateId, SerialNumber};

/// Outcome of a balancing pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Queue lengths before balancing
    pub before: Vec<usize>,
    /// Queue lengths after balancing
    pub after: Vec<usize>,
    /// Number of people moved to a different gate
    pub moved: usize,
}

impl BalanceReport {
    /// Difference between the longest and shortest queue after balancing
    pub fn spread(&self) -> usize {
        let max = self.after.iter().copied().max().unwrap_or(0);
        let min = self.after.iter().copied().min().unwrap_or(0);
        max - min
    }
}

/// Equalizes gate queue lengths
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadBalancer;

impl LoadBalancer {
    /// Create a balancer
    pub fn new() -> Self {
        Self
    }

    /// Per-gate target lengths for `total` queued people over `gate_count` gates
    ///
    /// Every gate gets `total / gate_count`; the remainder goes one each to the
    /// lowest-indexed gates.
    pub fn targets(total: usize, gate_count: usize) -> Vec<usize> {
        if gate_count == 0 {
            return Vec::new();
        }
        let base = total / gate_count;
        let remainder = total % gate_count;
        (0..gate_count).map(|index| base + usize::from(index < remainder)).collect()
    }

    /// Move people from long queues to short ones until lengths differ by at most one
    ///
    /// Pass 1 trims every gate down to its target from the front into an overflow
    /// buffer. Pass 2 tops gates up to their target from the buffer, re-pointing
    /// each moved person's record at the new gate. Total population is conserved.
    #[instrument(skip(self, population, gates))]
    pub fn rebalance(
        &self,
        population: &Population,
        gates: &GateRegistry,
    ) -> SimulationResult<BalanceReport> {
        let before = gates.snapshot_lengths();
        let targets = Self::targets(before.iter().sum(), gates.len());
        let mut overflow: Vec<(SerialNumber, GateId)> = Vec::new();

        for (gate, &target) in gates.iter().zip(&targets) {
            gate.with_queue(|queue| {
                while queue.len() > target {
                    if let Some(serial) = queue.pop_front() {
                        overflow.push((serial, gate.id()));
                    }
                }
            });
        }

        let mut moved = 0;
        for (gate, &target) in gates.iter().zip(&targets) {
            if overflow.is_empty() {
                break;
            }
            gate.with_queue(|queue| -> SimulationResult<()> {
                while queue.len() < target {
                    let Some((serial, from)) = overflow.pop() else { break };
                    if from != gate.id() {
                        population.move_gate(serial, from, gate.id())?;
                        moved += 1;
                    }
                    queue.push_back(serial);
                }
                Ok(())
            })?;
        }

        // Only reachable if queues changed underneath us; keep everyone queued.
        if !overflow.is_empty() {
            warn!("{} people left over after rebalancing, re-queueing", overflow.len());
            for (serial, from) in overflow.drain(..) {
                let to = gates.find_best_gate();
                if from != to {
                    population.move_gate(serial, from, to)?;
                    moved += 1;
                }
                gates.enqueue(to, serial)?;
            }
        }

        let report = BalanceReport { before, after: gates.snapshot_lengths(), moved };
        debug!(?report, "Rebalance complete");
        info!(
            "Rebalanced gates {:?} -> {:?} ({} moved)",
            report.before, report.after, report.moved
        );
        Ok(report)
    }
}
