//! Interactive admission session
//!
//! Drives the desk from an input stream until the stream ends, writing a
//! response for every request.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::admission::console;
use crate::admission::desk::{Admission, AdmissionDesk};
use crate::admission::input::SerialReader;

/// Counts of what happened at the desk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    /// Serials read from the input
    pub requests: usize,
    /// Regular arrivals sent to a queue
    pub interactive_arrivals: usize,
    /// VIPs admitted at the desk
    pub vip_walk_ins: usize,
    /// Requests turned away
    pub rejected: usize,
}

/// One pass over an input stream
#[derive(Debug)]
pub struct AdmissionSession<'a> {
    desk: &'a AdmissionDesk,
    tally: SessionTally,
}

impl<'a> AdmissionSession<'a> {
    /// Start a session at `desk`
    pub fn new(desk: &'a AdmissionDesk) -> Self {
        Self { desk, tally: SessionTally::default() }
    }

    /// Serve every serial in `input`, writing prompts and responses to `out`
    ///
    /// Returns once the input ends. Only output failures are errors.
    pub fn run<R: BufRead, W: Write>(mut self, input: R, out: &mut W) -> io::Result<SessionTally> {
        let mut serials = SerialReader::new(input);

        loop {
            console::write_prompt(out)?;
            let Some(raw) = serials.next() else {
                break;
            };
            self.tally.requests += 1;

            match self.desk.admit_external(raw) {
                Ok(admission) => {
                    match admission {
                        Admission::VipEntry { .. } => self.tally.vip_walk_ins += 1,
                        Admission::Queued(_) => self.tally.interactive_arrivals += 1,
                    }
                    console::write_admission(out, &admission)?;
                }
                Err(e) => {
                    self.tally.rejected += 1;
                    if e.is_recoverable() {
                        info!(input = raw, category = e.category(), "Rejected: {}", e);
                    } else {
                        warn!(input = raw, "Admission failed: {}", e);
                    }
                    console::write_rejection(out, &e)?;
                }
            }
        }

        writeln!(out)?;
        out.flush()?;
        info!(
            "Input closed after {} requests ({} queued, {} rejected)",
            self.tally.requests, self.tally.interactive_arrivals, self.tally.rejected
        );
        Ok(self.tally)
    }
}
