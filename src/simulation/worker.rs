//! Admission worker
//!
//! A background thread that, once per simulated minute, admits the person at the
//! front of every gate queue.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::queue_event;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::state::VenueState;
use crate::types::{GateId, SerialNumber};

/// Cooperative stop flag that can also be slept on
#[derive(Debug, Default)]
pub struct StopSignal {
    raised: Mutex<bool>,
    changed: Condvar,
}

impl StopSignal {
    /// Create a lowered signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal and wake anyone waiting on it
    pub fn raise(&self) {
        let mut raised = self.raised.lock().unwrap_or_else(PoisonError::into_inner);
        *raised = true;
        self.changed.notify_all();
    }

    /// Whether the signal has been raised
    pub fn is_raised(&self) -> bool {
        *self.raised.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for up to `timeout`, returning early if raised; returns whether raised
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let raised = self.raised.lock().unwrap_or_else(PoisonError::into_inner);
        let (raised, _) = self
            .changed
            .wait_timeout_while(raised, timeout, |raised| !*raised)
            .unwrap_or_else(PoisonError::into_inner);
        *raised
    }
}

/// What the worker did over its lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSummary {
    /// Admission passes completed
    pub passes: u64,
    /// People admitted, by gate index
    pub admitted_per_gate: Vec<usize>,
}

impl WorkerSummary {
    fn new(gate_count: usize) -> Self {
        Self { passes: 0, admitted_per_gate: vec![0; gate_count] }
    }

    /// Total people admitted
    pub fn admitted(&self) -> usize {
        self.admitted_per_gate.iter().sum()
    }
}

/// Admits one person from the front of each gate queue
#[derive(Debug, Clone)]
pub struct AdmissionWorker {
    state: Arc<VenueState>,
}

impl AdmissionWorker {
    /// Create a worker over shared venue state
    pub fn new(state: Arc<VenueState>) -> Self {
        Self { state }
    }

    /// Run one admission pass over every gate, in index order
    ///
    /// Each gate is locked only while its front person is popped and marked
    /// entered. Returns who entered through which gate.
    pub fn admit_pass(&self) -> Vec<(GateId, SerialNumber)> {
        let state = &self.state;
        let mut admitted = Vec::new();

        for gate in state.gates.iter() {
            let _transition = state.hold_transitions();
            gate.with_queue(|queue| {
                let Some(serial) = queue.pop_front() else {
                    return;
                };
                let now = state.clock.current_minute();
                match state.population.enter_from(serial, gate.id(), now) {
                    Ok(()) => {
                        state.counter.increase();
                        admitted.push((gate.id(), serial));
                        debug!(%serial, gate = %gate.id(), minute = now, "Admitted");
                    }
                    Err(e) => {
                        error!("Popped a serial whose record disagrees with the queue: {}", e);
                        debug_assert!(false, "queue and record out of sync: {e}");
                    }
                }
            });
        }

        admitted
    }

    /// Loop until stopped or drained, sleeping one simulated minute per pass
    #[instrument(skip_all)]
    pub fn run(&self, stop: &StopSignal) -> WorkerSummary {
        let state = &self.state;
        let mut summary = WorkerSummary::new(state.gates.len());
        let minute = state.clock.minute_duration();

        info!("Admission worker started");
        while !stop.is_raised() && !state.counter.is_drained() {
            if stop.wait_timeout(minute) {
                break;
            }

            let admitted = self.admit_pass();
            summary.passes += 1;
            for (gate, _) in &admitted {
                summary.admitted_per_gate[gate.index()] += 1;
            }
            queue_event!(
                debug,
                "Admission pass complete",
                pass = summary.passes,
                admitted = admitted.len(),
                entered = state.counter.entered(),
            );
        }

        info!(
            "Admission worker finished after {} passes ({} admitted)",
            summary.passes,
            summary.admitted()
        );
        summary
    }

    /// Run the worker loop on a dedicated thread
    pub fn spawn(self) -> SimulationResult<WorkerHandle> {
        let stop = Arc::new(StopSignal::new());
        let thread_stop = Arc::clone(&stop);

        let join = thread::Builder::new()
            .name("admission-worker".to_string())
            .spawn(move || self.run(&thread_stop))
            .map_err(|e| SimulationError::worker_error(format!("failed to spawn: {}", e)))?;

        Ok(WorkerHandle { join, stop })
    }
}

/// Handle to a running admission worker
#[derive(Debug)]
pub struct WorkerHandle {
    join: JoinHandle<WorkerSummary>,
    stop: Arc<StopSignal>,
}

impl WorkerHandle {
    /// Whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Ask the worker to stop after its current pass
    pub fn request_stop(&self) {
        self.stop.raise();
    }

    /// Stop the worker and wait for it
    pub fn stop(self) -> SimulationResult<WorkerSummary> {
        self.request_stop();
        self.join.join().map_err(|_| SimulationError::worker_error("admission worker panicked"))
    }
}
