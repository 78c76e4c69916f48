//! Main simulation orchestrator
//!
//! Sequences one run: seed and rebalance the queues, open the desk while the
//! worker admits people, sweep up whoever never arrived, wait for the queues to
//! drain, stop the worker and report.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::admission::{console, AdmissionDesk, AdmissionSession, SessionTally};
use crate::gates::{BalanceReport, InitialDistributor, LoadBalancer};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::state::VenueState;
use crate::simulation::statistics::{ArrivalBreakdown, SimulationReport, WaitMetrics};
use crate::simulation::worker::{AdmissionWorker, WorkerHandle, WorkerSummary};
use crate::types::{RunId, SimulationConfig};

// Upper bound on a single drain wait before re-checking the worker is alive.
const DRAIN_POLL: Duration = Duration::from_millis(100);

/// Coordinates one simulation run
#[derive(Debug)]
pub struct SimulationOrchestrator {
    run_id: RunId,
    state: Arc<VenueState>,
    distributor: InitialDistributor,
    balancer: LoadBalancer,
    balance: Option<BalanceReport>,
}

impl SimulationOrchestrator {
    /// Validate the configuration and build the venue
    #[instrument(skip(config), fields(population = config.population_size, gates = config.gate_count))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let run_id = RunId::new();
        info!("Initializing run {} with seed {}", run_id, config.seed);

        let distributor = InitialDistributor::with_seed(config.seed);
        let state = Arc::new(VenueState::new(config));

        Ok(Self { run_id, state, distributor, balancer: LoadBalancer::new(), balance: None })
    }

    /// Identity of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Shared venue state
    pub fn state(&self) -> &Arc<VenueState> {
        &self.state
    }

    /// Seed half the population into random gates, then rebalance once
    ///
    /// Runs before the worker exists, so nothing else touches the queues.
    /// Calling it again is a no-op.
    #[instrument(skip(self))]
    pub fn prepare(&mut self) -> SimulationResult<BalanceReport> {
        if let Some(report) = &self.balance {
            return Ok(report.clone());
        }

        let state = &self.state;
        let count = state.config.initial_seed_count();
        let seeded = self.distributor.distribute(&state.population, &state.gates, count)?;
        let report = self.balancer.rebalance(&state.population, &state.gates)?;

        info!(
            "Seeded {} people; queues {:?} -> {:?}",
            seeded, report.before, report.after
        );
        self.balance = Some(report.clone());
        Ok(report)
    }

    /// Run the whole simulation against an input stream
    ///
    /// Prompts and responses go to `output`. Returns once every person has
    /// entered and the worker has stopped.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> SimulationResult<SimulationReport> {
        let balance = self.prepare()?;
        let state = Arc::clone(&self.state);

        console::write_banner(output, &state.config)?;

        let worker = AdmissionWorker::new(Arc::clone(&state)).spawn()?;
        let desk = AdmissionDesk::new(Arc::clone(&state));

        let session = match AdmissionSession::new(&desk).run(input, output) {
            Ok(tally) => tally,
            Err(e) => {
                warn!("Output failed during the session, sweeping anyway: {}", e);
                SessionTally::default()
            }
        };

        let swept = desk.sweep_remaining()?;
        let summary = self.wait_for_drain(worker)?;

        let report = self.build_report(balance, session, swept.len(), summary);
        writeln!(output)?;
        write!(output, "{}", report)?;
        output.flush()?;

        Ok(report)
    }

    fn wait_for_drain(&self, worker: WorkerHandle) -> SimulationResult<WorkerSummary> {
        let counter = &self.state.counter;

        while !counter.wait_until_drained(DRAIN_POLL) {
            if worker.is_finished() && !counter.is_drained() {
                // The worker only exits early on a stop request or a panic.
                let summary = worker.stop()?;
                return Err(SimulationError::worker_error(format!(
                    "worker exited with {} of {} admitted after {} passes",
                    counter.entered(),
                    counter.target(),
                    summary.passes
                )));
            }
        }

        info!("All {} non-VIP people have entered", counter.entered());
        worker.stop()
    }

    fn build_report(
        &self,
        balance: BalanceReport,
        session: SessionTally,
        drain_swept: usize,
        summary: WorkerSummary,
    ) -> SimulationReport {
        let state = &self.state;
        let people = state.population.snapshot();

        SimulationReport {
            run_id: self.run_id,
            started_at: state.clock.started_at(),
            config: state.config.clone(),
            metrics: WaitMetrics::from_people(&people),
            elapsed_seconds: state.clock.elapsed_seconds(),
            simulated_minutes: state.clock.current_minute(),
            vip_count: state.population.vip_count(),
            admitted_per_gate: summary.admitted_per_gate,
            worker_passes: summary.passes,
            balance,
            session,
            drain_swept,
            arrivals: ArrivalBreakdown::from_people(&people),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fast_config() -> SimulationConfig {
        SimulationConfig { minute_millis: 5, ..SimulationConfig::default() }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulationConfig { gate_count: 0, ..SimulationConfig::default() };
        let error = SimulationOrchestrator::new(config).unwrap_err();
        assert_eq!(error.category(), "Configuration");
    }

    #[test]
    fn test_prepare_seeds_and_balances() {
        let mut orchestrator = SimulationOrchestrator::new(fast_config()).unwrap();
        let report = orchestrator.prepare().unwrap();

        assert_eq!(report.after.iter().sum::<usize>(), 5);
        assert!(report.spread() <= 1);
        assert_eq!(orchestrator.state().status_counts().queued, 5);
        assert!(orchestrator.state().is_consistent());

        // Second call changes nothing
        assert_eq!(orchestrator.prepare().unwrap(), report);
        assert_eq!(orchestrator.state().gates.total_queued(), 5);
    }

    #[test]
    fn test_run_with_no_input_drains_everyone() {
        let mut orchestrator = SimulationOrchestrator::new(fast_config()).unwrap();
        let mut out = Vec::new();
        let report = orchestrator.run(Cursor::new(""), &mut out).unwrap();

        assert_eq!(report.drain_swept, 4);
        assert_eq!(report.admitted_per_gate.iter().sum::<usize>(), 9);
        assert_eq!(report.metrics.measured, 10);
        assert_eq!(orchestrator.state().status_counts().entered, 10);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("===== METRICS ====="));
    }
}
