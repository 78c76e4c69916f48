//! Run statistics and reporting
//!
//! Metrics are derived only from the arrival and entry stamps on each person
//! record, after the worker has stopped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::admission::SessionTally;
use crate::gates::BalanceReport;
use crate::population::Person;
use crate::types::{ArrivalSource, RunId, SimulationConfig};

/// Wait times over everyone with both an arrival and an entry stamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitMetrics {
    /// People with both stamps
    pub measured: usize,
    /// Sum of all waits in simulated minutes
    pub total_wait: u64,
    /// Mean wait, floored to whole minutes
    pub average_wait: u64,
    /// Longest wait in simulated minutes
    pub max_wait: u64,
}

impl WaitMetrics {
    /// Compute metrics from person records
    pub fn from_people<'a>(people: impl IntoIterator<Item = &'a Person>) -> Self {
        let mut metrics = Self::default();
        for wait in people.into_iter().filter_map(Person::wait_minutes) {
            metrics.measured += 1;
            metrics.total_wait += wait;
            metrics.max_wait = metrics.max_wait.max(wait);
        }
        if metrics.measured > 0 {
            metrics.average_wait = metrics.total_wait / metrics.measured as u64;
        }
        metrics
    }
}

/// Head count by how people reached the venue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalBreakdown {
    /// VIPs admitted at start
    pub vip_pre_admitted: usize,
    /// Seeded by the initial distributor
    pub seeded: usize,
    /// Queued through the desk
    pub interactive: usize,
    /// VIPs admitted at the desk
    pub vip_walk_in: usize,
    /// Force-assigned by the drain sweep
    pub drain_sweep: usize,
    /// Never arrived
    pub not_arrived: usize,
}

impl ArrivalBreakdown {
    /// Count arrival sources over person records
    pub fn from_people<'a>(people: impl IntoIterator<Item = &'a Person>) -> Self {
        let mut breakdown = Self::default();
        for person in people {
            match person.arrival_source {
                Some(ArrivalSource::VipPreAdmitted) => breakdown.vip_pre_admitted += 1,
                Some(ArrivalSource::Seeded) => breakdown.seeded += 1,
                Some(ArrivalSource::Interactive) => breakdown.interactive += 1,
                Some(ArrivalSource::VipWalkIn) => breakdown.vip_walk_in += 1,
                Some(ArrivalSource::DrainSweep) => breakdown.drain_sweep += 1,
                None => breakdown.not_arrived += 1,
            }
        }
        breakdown
    }
}

/// Everything worth keeping about one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Identity of the run
    pub run_id: RunId,
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Configuration used
    pub config: SimulationConfig,
    /// Wait-time metrics
    pub metrics: WaitMetrics,
    /// Real seconds from clock start to worker stop
    pub elapsed_seconds: u64,
    /// Simulated minutes from clock start to worker stop
    pub simulated_minutes: u64,
    /// People classified VIP
    pub vip_count: usize,
    /// Admissions by gate index
    pub admitted_per_gate: Vec<usize>,
    /// Admission passes run by the worker
    pub worker_passes: u64,
    /// Queue lengths around the initial rebalance
    pub balance: BalanceReport,
    /// What happened at the desk
    pub session: SessionTally,
    /// People force-assigned after input closed
    pub drain_swept: usize,
    /// Head count by arrival source
    pub arrivals: ArrivalBreakdown,
}

impl SimulationReport {
    /// The closing metrics block shown at the end of a run
    pub fn metrics_block(&self) -> String {
        format!(
            "===== METRICS =====\n\
             Average wait: {} minutes\n\
             Max wait: {} minutes\n\
             Total time: {} seconds\n\
             ===================\n",
            self.metrics.average_wait, self.metrics.max_wait, self.elapsed_seconds
        )
    }

    /// Multi-line breakdown for verbose output
    pub fn detailed_breakdown(&self) -> String {
        let mut breakdown = String::new();
        breakdown.push_str(&format!("=== Run {} ===\n", self.run_id));
        breakdown.push_str(&format!("Started: {}\n", self.started_at.to_rfc3339()));
        breakdown.push_str(&format!(
            "Population: {} ({} VIP), gates: {}\n\n",
            self.config.population_size, self.vip_count, self.config.gate_count
        ));

        breakdown.push_str("Arrivals:\n");
        breakdown.push_str(&format!("  - VIP at start: {}\n", self.arrivals.vip_pre_admitted));
        breakdown.push_str(&format!("  - Seeded: {}\n", self.arrivals.seeded));
        breakdown.push_str(&format!("  - At the desk: {}\n", self.arrivals.interactive));
        breakdown.push_str(&format!("  - VIP walk-ins: {}\n", self.arrivals.vip_walk_in));
        breakdown.push_str(&format!("  - Drain sweep: {}\n", self.arrivals.drain_sweep));

        breakdown.push_str("\nDesk:\n");
        breakdown.push_str(&format!("  - Requests: {}\n", self.session.requests));
        breakdown.push_str(&format!("  - Rejected: {}\n", self.session.rejected));

        breakdown.push_str("\nGates:\n");
        for (index, admitted) in self.admitted_per_gate.iter().enumerate() {
            breakdown.push_str(&format!("  - Gate {}: {} admitted\n", index + 1, admitted));
        }
        breakdown.push_str(&format!(
            "  - Initial queues {:?} rebalanced to {:?} ({} moved)\n",
            self.balance.before, self.balance.after, self.balance.moved
        ));
        breakdown.push_str(&format!(
            "\n{} admission passes over {} simulated minutes\n",
            self.worker_passes, self.simulated_minutes
        ));

        breakdown
    }

    /// Pretty JSON form of the report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metrics_block())
    }
}
