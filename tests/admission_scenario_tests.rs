//! Tests for the interactive admission scenarios
//!
//! Each test drives the desk directly against a venue with a slow clock so the
//! worker never interferes.

use std::io::Cursor;
use std::sync::Arc;

use entry_queue_simulator::admission::{Admission, AdmissionDesk, AdmissionSession};
use entry_queue_simulator::simulation::{AdmissionError, VenueState};
use entry_queue_simulator::types::{
    ArrivalSource, GateId, PersonStatus, SerialNumber, SimulationConfig,
};

fn quiet_venue() -> Arc<VenueState> {
    Arc::new(VenueState::new(SimulationConfig {
        minute_millis: 60_000,
        ..SimulationConfig::default()
    }))
}

/// With M=10 and N=2 only serial 0 is VIP, inside at minute zero
#[test]
fn test_single_vip_preadmitted() {
    let state = quiet_venue();
    let vips: Vec<usize> = state
        .population
        .snapshot()
        .iter()
        .filter(|person| person.is_vip)
        .map(|person| person.serial.index())
        .collect();
    assert_eq!(vips, vec![0]);

    let vip = state.population.person(SerialNumber(0)).unwrap();
    assert_eq!(vip.status, PersonStatus::Entered);
    assert_eq!(vip.arrival_time, Some(0));
    assert_eq!(vip.entry_time, Some(0));
    assert_eq!(vip.arrival_source, Some(ArrivalSource::VipPreAdmitted));
    assert_eq!(state.counter.vip_count(), 1);
}

/// VIP classification is stable across calls and instances
#[test]
fn test_vip_classification_is_deterministic() {
    let first = quiet_venue();
    let second = quiet_venue();
    for index in 0..10 {
        let serial = SerialNumber(index);
        assert_eq!(first.population.is_vip(serial), first.population.is_vip(serial));
        assert_eq!(first.population.is_vip(serial), second.population.is_vip(serial));
    }
}

/// First arrival 1000005 with both gates empty
#[test]
fn test_first_arrival_recommends_both_gates() {
    let state = quiet_venue();
    let desk = AdmissionDesk::new(Arc::clone(&state));

    let Admission::Queued(ticket) = desk.admit_external(1_000_005).unwrap() else {
        panic!("serial 5 is not a VIP");
    };

    assert_eq!(ticket.estimated_wait, 1);
    assert_eq!(ticket.recommendation.lengths, vec![0, 0]);
    assert_eq!(ticket.recommendation.gates, vec![GateId(0), GateId(1)]);
    assert!(ticket.recommendation.gates.contains(&ticket.assigned));

    let person = state.population.person(SerialNumber(5)).unwrap();
    assert_eq!(person.status, PersonStatus::Queued { gate: ticket.assigned });
    assert_eq!(person.arrival_time, Some(0));
    assert_eq!(person.arrival_source, Some(ArrivalSource::Interactive));
}

/// Re-submitting an entered serial changes nothing
#[test]
fn test_reentry_leaves_state_untouched() {
    let state = quiet_venue();
    let desk = AdmissionDesk::new(Arc::clone(&state));

    let before = state.population.snapshot();
    let queues = state.gates.snapshot_queues();

    for _ in 0..2 {
        assert_eq!(
            desk.admit_external(1_000_000),
            Err(AdmissionError::AlreadyEntered(SerialNumber(0)))
        );
    }

    assert_eq!(state.population.snapshot(), before);
    assert_eq!(state.gates.snapshot_queues(), queues);
    assert_eq!(state.counter.entered(), 0);
}

/// Duplicate queue attempts report the current gate, 1-based in the text
#[test]
fn test_duplicate_queue_reports_gate() {
    let state = quiet_venue();
    let desk = AdmissionDesk::new(Arc::clone(&state));
    let mut out = Vec::new();

    let tally = AdmissionSession::new(&desk)
        .run(Cursor::new("1000004\n1000006\n1000006\n"), &mut out)
        .unwrap();

    assert_eq!(tally.interactive_arrivals, 2);
    assert_eq!(tally.rejected, 1);
    assert_eq!(
        state.population.status(SerialNumber(6)),
        Some(PersonStatus::Queued { gate: GateId(1) })
    );

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("You have been assigned to Gate 1."));
    assert!(text.contains("You have been assigned to Gate 2."));
    assert!(text.contains("You are already in a queue at Gate 2."));
}

/// Out-of-range input is rejected and the loop keeps going
#[test]
fn test_invalid_serials_do_not_stop_the_session() {
    let state = quiet_venue();
    let desk = AdmissionDesk::new(Arc::clone(&state));
    let mut out = Vec::new();

    let tally = AdmissionSession::new(&desk)
        .run(Cursor::new("12 1000010 999999 1000003"), &mut out)
        .unwrap();

    assert_eq!(tally.requests, 4);
    assert_eq!(tally.rejected, 3);
    assert_eq!(tally.interactive_arrivals, 1);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches("Invalid serial number. Please try again.").count(), 3);
}

/// A number glued to junk still counts; the junk closes the input
#[test]
fn test_trailing_junk_reads_leading_serial() {
    let state = quiet_venue();
    let desk = AdmissionDesk::new(Arc::clone(&state));
    let mut out = Vec::new();

    let tally = AdmissionSession::new(&desk)
        .run(Cursor::new("1000005x 1000006"), &mut out)
        .unwrap();

    assert_eq!(tally.requests, 1);
    assert_eq!(tally.interactive_arrivals, 1);
    let queued = state.population.person(SerialNumber(5)).unwrap();
    assert_eq!(queued.arrival_source, Some(ArrivalSource::Interactive));
    assert_eq!(state.population.person(SerialNumber(6)).unwrap().arrival_time, None);
}

/// Arrivals go to the shortest queue, ties to the lowest gate
#[test]
fn test_arrivals_alternate_between_equal_gates() {
    let state = quiet_venue();
    let desk = AdmissionDesk::new(Arc::clone(&state));

    let assigned: Vec<GateId> = (1_000_001..=1_000_006)
        .map(|raw| match desk.admit_external(raw).unwrap() {
            Admission::Queued(ticket) => ticket.assigned,
            Admission::VipEntry { .. } => panic!("no VIPs in range"),
        })
        .collect();

    assert_eq!(assigned, vec![GateId(0), GateId(1), GateId(0), GateId(1), GateId(0), GateId(1)]);
    assert_eq!(state.gates.snapshot_lengths(), vec![3, 3]);
    assert!(state.is_consistent());
}
