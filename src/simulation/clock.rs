//! Simulated clock
//!
//! Maps real elapsed time onto simulated minutes at a fixed ratio, one second
//! per minute by default.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::info;

/// Monotonic source of simulated minutes
#[derive(Debug, Clone, Copy)]
pub struct SimulatedClock {
    /// Monotonic start instant
    start: Instant,
    /// Wall-clock start, for reports
    started_at: DateTime<Utc>,
    /// Real duration of one simulated minute
    minute: Duration,
}

impl SimulatedClock {
    /// Start a clock where one simulated minute lasts `minute` of real time
    pub fn start(minute: Duration) -> Self {
        // A zero-length minute would make every reading divide by zero.
        let minute = minute.max(Duration::from_millis(1));
        info!("Starting simulated clock ({:?} per simulated minute)", minute);
        Self { start: Instant::now(), started_at: Utc::now(), minute }
    }

    /// Real time elapsed since the clock started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whole real seconds elapsed since the clock started
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Current simulated minute, floored; never decreases
    pub fn current_minute(&self) -> u64 {
        (self.elapsed().as_nanos() / self.minute.as_nanos()) as u64
    }

    /// Real duration of one simulated minute
    pub fn minute_duration(&self) -> Duration {
        self.minute
    }

    /// Wall-clock time the clock started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::start(Duration::from_secs(1))
    }
}
