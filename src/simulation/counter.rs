//! Completion counter
//!
//! Tracks how many non-VIP people have entered. The run is drained once
//! `entered >= population_size - vip_count`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Atomic admission counter with a drain notification
#[derive(Debug)]
pub struct CompletionCounter {
    entered: AtomicUsize,
    vip_count: AtomicUsize,
    population_size: usize,
    // Pairs with `drained` so waiters never miss the final increment.
    gate: Mutex<()>,
    drained: Condvar,
}

impl CompletionCounter {
    /// Create a counter for a population with no VIPs recorded yet
    pub fn new(population_size: usize) -> Self {
        Self {
            entered: AtomicUsize::new(0),
            vip_count: AtomicUsize::new(0),
            population_size,
            gate: Mutex::new(()),
            drained: Condvar::new(),
        }
    }

    /// Create a counter with `vip_count` VIPs already recorded
    pub fn with_vips(population_size: usize, vip_count: usize) -> Self {
        let counter = Self::new(population_size);
        counter.vip_count.store(vip_count, Ordering::SeqCst);
        counter
    }

    /// Record one VIP during initialization
    pub fn record_vip(&self) {
        self.vip_count.fetch_add(1, Ordering::SeqCst);
        self.notify();
    }

    /// Record one non-VIP admission
    pub fn increase(&self) {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.notify();
    }

    /// Number of non-VIP admissions so far
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    /// Number of VIPs recorded at initialization
    pub fn vip_count(&self) -> usize {
        self.vip_count.load(Ordering::SeqCst)
    }

    /// Admissions needed before the run is drained
    pub fn target(&self) -> usize {
        self.population_size.saturating_sub(self.vip_count())
    }

    /// Whether every non-VIP has entered
    pub fn is_drained(&self) -> bool {
        self.entered() >= self.target()
    }

    /// Block until drained or until `timeout` passes; returns whether drained
    pub fn wait_until_drained(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        while !self.is_drained() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            guard = self
                .drained
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        true
    }

    fn notify(&self) {
        let _guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        self.drained.notify_all();
    }
}
