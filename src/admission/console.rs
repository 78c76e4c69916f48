//! Text rendering for the admission desk
//!
//! Gate numbers shown here are 1-based.

use std::io::{self, Write};

use crate::admission::desk::{Admission, QueueTicket};
use crate::simulation::error::AdmissionError;
use crate::types::SimulationConfig;

const SEPARATOR: &str = "----------------------------------";

/// Write the start-of-run banner
pub fn write_banner<W: Write>(out: &mut W, config: &SimulationConfig) -> io::Result<()> {
    let (min, max) = config.external_serial_range();
    writeln!(out, "===== ENTRY QUEUE MANAGEMENT SYSTEM =====")?;
    if config.minute_millis == 1000 {
        writeln!(out, "Simulation started (1 second = 1 minute)")?;
    } else {
        writeln!(out, "Simulation started ({} ms = 1 minute)", config.minute_millis)?;
    }
    writeln!(out, "Enter serials between {} and {}", min, max)?;
    writeln!(out, "Close input or type any non-number to stop manual input")?;
    writeln!(out)?;
    out.flush()
}

/// Write the per-request prompt
pub fn write_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "Welcome to the Entry Queue Management System!")?;
    write!(out, "Please enter your 7-digit serial number: ")?;
    out.flush()
}

/// Write the response to a successful request
pub fn write_admission<W: Write>(out: &mut W, admission: &Admission) -> io::Result<()> {
    match admission {
        Admission::VipEntry { .. } => writeln!(out, "VIP detected! You may enter immediately."),
        Admission::Queued(ticket) => write_ticket(out, ticket),
    }
}

fn write_ticket<W: Write>(out: &mut W, ticket: &QueueTicket) -> io::Result<()> {
    writeln!(out, "Estimated waiting time: {} minutes", ticket.estimated_wait)?;
    let recommended: Vec<String> =
        ticket.recommendation.gates.iter().map(|gate| gate.number().to_string()).collect();
    writeln!(out, "Recommended gate(s): {}", recommended.join(" "))?;
    writeln!(out, "You have been assigned to Gate {}.", ticket.assigned.number())
}

/// Write the response to a rejected request
pub fn write_rejection<W: Write>(out: &mut W, error: &AdmissionError) -> io::Result<()> {
    match error {
        AdmissionError::Malformed(_) | AdmissionError::OutOfRange { .. } => {
            writeln!(out, "Invalid serial number. Please try again.")
        }
        AdmissionError::AlreadyEntered(_) => {
            writeln!(out, "You have already entered the stadium. Re-entry not allowed.")
        }
        AdmissionError::AlreadyQueued { gate, .. } => {
            writeln!(out, "You are already in a queue at Gate {}.", gate.number())?;
            writeln!(out, "Queue switching is currently disabled.")
        }
        AdmissionError::Internal(_) => {
            writeln!(out, "Sorry, we could not process your serial number. Please try again.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::GateRecommendation;
    use crate::types::{GateId, SerialNumber};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_banner_shows_serial_range() {
        let text = render(|out| write_banner(out, &SimulationConfig::default()));
        assert!(text.starts_with("===== ENTRY QUEUE MANAGEMENT SYSTEM =====\n"));
        assert!(text.contains("(1 second = 1 minute)"));
        assert!(text.contains("Enter serials between 1000000 and 1000009"));
    }

    #[test]
    fn test_ticket_uses_one_based_gates() {
        let ticket = QueueTicket {
            serial: SerialNumber(5),
            arrival_minute: 0,
            estimated_wait: 1,
            recommendation: GateRecommendation::from_lengths(vec![0, 0]),
            assigned: GateId(0),
        };
        let text = render(|out| write_admission(out, &Admission::Queued(ticket)));
        assert_eq!(
            text,
            "Estimated waiting time: 1 minutes\n\
             Recommended gate(s): 1 2\n\
             You have been assigned to Gate 1.\n"
        );
    }

    #[test]
    fn test_rejection_messages() {
        let text = render(|out| {
            write_rejection(out, &AdmissionError::AlreadyEntered(SerialNumber(0)))
        });
        assert_eq!(text, "You have already entered the stadium. Re-entry not allowed.\n");

        let text = render(|out| {
            write_rejection(
                out,
                &AdmissionError::AlreadyQueued { serial: SerialNumber(3), gate: GateId(1) },
            )
        });
        assert!(text.starts_with("You are already in a queue at Gate 2.\n"));
    }
}
