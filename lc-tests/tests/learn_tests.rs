//! Integration Tests für den Lern-Modus
//!
//! Diese Tests laufen auf dem Host (x86_64) und spielen Pakete der
//! Original-Fernbedienung über MockTransport ein.

mod common;

use common::{MockClock, MockTransport, address, remote_packet};
use lc_core::registers::{SFRX, SIDLE, SRX};
use lc_core::{
    CommandOutcome, LEARN_DURATION_MS, LampCommand, LampError, LearnReport, LearnState, LearnStep,
    LivingColors, RX_STALL_MS, TransportError,
};

fn learning_engine(packets: Vec<Vec<u8>>) -> LivingColors<MockTransport> {
    LivingColors::new(MockTransport::with_packets(packets))
}

// ============================================================================
// Tests: begin_learning() / poll_learning()
// ============================================================================

#[test]
fn test_begin_learning_enters_receive_mode() {
    let mut lamps = learning_engine(vec![]);

    let session = lamps.begin_learning(1000).unwrap();

    assert_eq!(session.state(), LearnState::Listening);
    assert_eq!(session.deadline_ms(), 1000 + LEARN_DURATION_MS);
    assert_eq!(lamps.transport().strobes(), vec![SIDLE, SFRX, SRX]);
}

#[test]
fn test_empty_fifo_keeps_waiting() {
    let mut lamps = learning_engine(vec![]);
    let mut session = lamps.begin_learning(0).unwrap();

    assert_eq!(lamps.poll_learning(&mut session, 10), Ok(LearnStep::Waiting));
    assert!(session.is_listening());
}

#[test]
fn test_captures_new_address_and_sequence() {
    let mut lamps = learning_engine(vec![remote_packet(address(1), 0x05, 0x41)]);
    let mut session = lamps.begin_learning(0).unwrap();

    let step = lamps.poll_learning(&mut session, 10).unwrap();

    assert_eq!(
        step,
        LearnStep::Captured {
            index: 0,
            new: true,
            sequence: 0x41
        }
    );
    assert_eq!(lamps.get_lamp(0), Some(address(1)));
    assert_eq!(lamps.sequence(), 0x41);

    // nächstes Kommando muss die Lampe akzeptieren: Sequenz + 1
    assert_eq!(lamps.turn_off(0), Ok(0x42));
}

#[test]
fn test_known_address_refreshes_sequence() {
    let mut lamps = learning_engine(vec![
        remote_packet(address(1), 0x03, 0x10),
        remote_packet(address(1), 0x07, 0x11),
    ]);
    let mut session = lamps.begin_learning(0).unwrap();

    lamps.poll_learning(&mut session, 10).unwrap();
    let step = lamps.poll_learning(&mut session, 20).unwrap();

    assert_eq!(
        step,
        LearnStep::Captured {
            index: 0,
            new: false,
            sequence: 0x11
        }
    );
    assert_eq!(lamps.num_lamps(), 1);
    assert_eq!(lamps.sequence(), 0x11);
    assert_eq!(session.report().added, 1);
    assert_eq!(session.report().refreshed, 1);
}

#[test]
fn test_crc_error_is_ignored() {
    let mut packet = remote_packet(address(1), 0x05, 7);
    let last = packet.len() - 1;
    packet[last] &= 0x7F;
    let mut lamps = learning_engine(vec![packet]);
    let mut session = lamps.begin_learning(0).unwrap();

    assert_eq!(lamps.poll_learning(&mut session, 10), Ok(LearnStep::Ignored));
    assert_eq!(lamps.num_lamps(), 0);
    assert_eq!(lamps.sequence(), 0);
    assert!(session.is_listening());
}

#[test]
fn test_stalled_short_packet_is_dropped() {
    let mut lamps = learning_engine(vec![vec![0x03, 0xAA, 0xBB, 0xCC, 0x80]]);
    let mut session = lamps.begin_learning(0).unwrap();

    // erste Abfrage: Paket könnte noch wachsen
    assert_eq!(lamps.poll_learning(&mut session, 10), Ok(LearnStep::Waiting));
    // 10 ms ohne neue Bytes -> verwerfen
    assert_eq!(lamps.poll_learning(&mut session, 20), Ok(LearnStep::Ignored));
    assert_eq!(session.report().ignored, 1);
    assert_eq!(lamps.poll_learning(&mut session, 30), Ok(LearnStep::Waiting));
}

#[test]
fn test_partial_packet_waits_for_stall_timeout() {
    let mut lamps = learning_engine(vec![vec![0x0E, 0xAA, 0xBB]]);
    let mut session = lamps.begin_learning(0).unwrap();

    assert_eq!(lamps.poll_learning(&mut session, 10), Ok(LearnStep::Waiting));
    // gleiche Byte-Anzahl, aber noch innerhalb der Frist
    assert_eq!(
        lamps.poll_learning(&mut session, 10 + RX_STALL_MS - 1),
        Ok(LearnStep::Waiting)
    );
    assert_eq!(lamps.transport().strobes(), vec![SIDLE, SFRX, SRX]);

    assert_eq!(
        lamps.poll_learning(&mut session, 10 + RX_STALL_MS),
        Ok(LearnStep::Ignored)
    );
}

#[test]
fn test_transport_error_ends_session() {
    let mut lamps = learning_engine(vec![remote_packet(address(1), 0x05, 1)]);
    let mut session = lamps.begin_learning(0).unwrap();
    lamps.transport_mut().fail_next = Some(TransportError::Bus);

    assert_eq!(
        lamps.poll_learning(&mut session, 10),
        Err(LampError::Transport(TransportError::Bus))
    );
    assert_eq!(session.state(), LearnState::Idle);
    assert_eq!(lamps.transport().strobes().last(), Some(&SIDLE));

    let ops_before = lamps.transport().ops.len();
    assert!(matches!(
        lamps.poll_learning(&mut session, 20),
        Ok(LearnStep::Finished(_))
    ));
    assert_eq!(lamps.transport().ops.len(), ops_before);
}

#[test]
fn test_fifo_overflow_restarts_receiver() {
    let mut lamps = learning_engine(vec![remote_packet(address(1), 0x05, 1)]);
    lamps.transport_mut().rx_overflow_next = true;
    let mut session = lamps.begin_learning(0).unwrap();

    assert_eq!(lamps.poll_learning(&mut session, 10), Ok(LearnStep::Ignored));
    assert_eq!(lamps.num_lamps(), 0);
    assert_eq!(&lamps.transport().strobes()[3..], &[SIDLE, SFRX, SRX]);
}

#[test]
fn test_full_book_discards_new_address() {
    let transport = MockTransport::with_packets(vec![
        remote_packet(address(1), 0x05, 0x20),
        remote_packet(address(2), 0x05, 0x60),
        remote_packet(address(1), 0x05, 0x21),
    ]);
    let mut lamps: LivingColors<MockTransport, 1> = LivingColors::new(transport);
    let mut session = lamps.begin_learning(0).unwrap();

    lamps.poll_learning(&mut session, 1).unwrap();
    assert_eq!(lamps.poll_learning(&mut session, 2), Ok(LearnStep::Discarded));
    // verworfene Adresse ändert den Zähler nicht
    assert_eq!(lamps.sequence(), 0x20);

    // Lernen läuft weiter
    assert!(matches!(
        lamps.poll_learning(&mut session, 3),
        Ok(LearnStep::Captured { index: 0, new: false, .. })
    ));
    assert_eq!(lamps.num_lamps(), 1);
    assert_eq!(session.report().discarded, 1);
}

#[test]
fn test_deadline_finishes_and_keeps_captures() {
    let mut lamps = learning_engine(vec![remote_packet(address(4), 0x03, 9)]);
    let mut session = lamps.begin_learning(0).unwrap();
    lamps.poll_learning(&mut session, 100).unwrap();

    let step = lamps
        .poll_learning(&mut session, LEARN_DURATION_MS)
        .unwrap();

    let expected = LearnReport {
        frames: 1,
        added: 1,
        ..LearnReport::default()
    };
    assert_eq!(step, LearnStep::Finished(expected));
    assert_eq!(session.state(), LearnState::Idle);
    assert_eq!(lamps.transport().strobes().last(), Some(&SIDLE));
    assert_eq!(lamps.get_lamp(0), Some(address(4)));

    // beendete Session fragt den Chip nicht mehr ab
    let ops_before = lamps.transport().ops.len();
    assert_eq!(
        lamps.poll_learning(&mut session, LEARN_DURATION_MS + 1),
        Ok(LearnStep::Finished(expected))
    );
    assert_eq!(lamps.transport().ops.len(), ops_before);
}

// ============================================================================
// Tests: learn_lamps() (blockierend)
// ============================================================================

#[test]
fn test_learn_lamps_collects_addresses() {
    let mut lamps = learning_engine(vec![
        remote_packet(address(1), 0x05, 0x01),
        remote_packet(address(2), 0x03, 0x02),
        remote_packet(address(1), 0x07, 0x03),
    ]);
    let clock = MockClock::new(0, 50);

    let report = lamps.learn_lamps(&clock).unwrap();

    assert_eq!(report.frames, 3);
    assert_eq!(report.added, 2);
    assert_eq!(report.refreshed, 1);
    assert_eq!(lamps.num_lamps(), 2);
    assert_eq!(lamps.get_lamp(1), Some(address(2)));
    assert_eq!(lamps.sequence(), 0x03);
}

#[test]
fn test_learn_lamps_waits_for_slowly_arriving_frame() {
    // ein Byte pro drei Abfragen, die Uhr läuft 1 ms pro Abfrage
    let transport =
        MockTransport::with_trickled_packets(3, vec![remote_packet(address(1), 0x05, 0x41)]);
    let mut lamps: LivingColors<MockTransport> = LivingColors::new(transport);
    let clock = MockClock::new(0, 1);

    let report = lamps.learn_lamps(&clock).unwrap();

    assert_eq!(report.frames, 1);
    assert_eq!(report.added, 1);
    assert_eq!(report.ignored, 0);
    assert_eq!(lamps.get_lamp(0), Some(address(1)));
    assert_eq!(lamps.sequence(), 0x41);
}

#[test]
fn test_execute_learn() {
    let mut lamps = learning_engine(vec![remote_packet(address(3), 0x05, 0xFF)]);
    let clock = MockClock::new(0, 100);

    let outcome = lamps.execute(LampCommand::Learn, &clock).unwrap();

    assert!(matches!(
        outcome,
        CommandOutcome::Learned(LearnReport { added: 1, .. })
    ));
    // Sequenz läuft nach 0xFF über
    assert_eq!(lamps.turn_on(0, Default::default()), Ok(0x00));
}
