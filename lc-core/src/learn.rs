//! Lern-Modus: passives Mitschneiden der Original-Fernbedienung
//!
//! ```text
//! Idle -> Listening -> (Frame | Timeout) -> Listening | Idle
//! ```
//!
//! Erkannte Frames liefern Adresse und Sequenznummer. Kaputte Pakete werden
//! verworfen, es gibt keine Wiederholung: der Benutzer drückt einfach
//! nochmal eine Taste auf der Fernbedienung.

use crate::frame::{ObservedFrame, RX_PACKET_LEN};
use crate::protocol::LivingColors;
use crate::registers::{FIFO, FIFO_BYTES_MASK, FIFO_OVERFLOW, READ_BURST, RXBYTES, SFRX, SIDLE, SRX};
use crate::traits::{Cc2500Transport, Clock, LampError};
use crate::types::LearnReport;

/// Dauer eines Lern-Durchlaufs
pub const LEARN_DURATION_MS: u64 = 5000;

/// Größe des RX-FIFO im CC2500
const RX_FIFO_LEN: usize = 64;

/// Zeit ohne neue Bytes, nach der ein unvollständiges Paket als abgebrochen gilt
///
/// Ein komplettes Paket braucht bei 250 kBaud unter 1 ms.
pub const RX_STALL_MS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnState {
    Idle,
    Listening,
}

/// Zustand eines laufenden Lern-Durchlaufs
#[derive(Debug, Clone)]
pub struct LearnSession {
    state: LearnState,
    deadline_ms: u64,
    /// Byte-Anzahl im RX-FIFO bei der letzten Abfrage (Paket unvollständig)
    pending_bytes: u8,
    /// Zeitpunkt, seit dem `pending_bytes` unverändert ist
    pending_since_ms: u64,
    report: LearnReport,
}

impl LearnSession {
    pub fn state(&self) -> LearnState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == LearnState::Listening
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    pub fn report(&self) -> LearnReport {
        self.report
    }
}

/// Ergebnis einer einzelnen Abfrage im Lern-Modus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnStep {
    /// Kein vollständiges Paket im FIFO
    Waiting,
    /// Paket verworfen (Länge, CRC, Opcode oder FIFO-Überlauf)
    Ignored,
    /// Frame mitgeschnitten, Sequenzzähler übernommen
    Captured { index: u8, new: bool, sequence: u8 },
    /// Neue Adresse bei vollem Adressbuch, nicht gespeichert
    Discarded,
    Finished(LearnReport),
}

impl<T: Cc2500Transport, const N: usize> LivingColors<T, N> {
    /// Schaltet den Empfänger ein und startet die Lern-Frist
    pub fn begin_learning(&mut self, now_ms: u64) -> Result<LearnSession, LampError> {
        self.restart_receiver()?;
        Ok(LearnSession {
            state: LearnState::Listening,
            deadline_ms: now_ms.saturating_add(LEARN_DURATION_MS),
            pending_bytes: 0,
            pending_since_ms: now_ms,
            report: LearnReport::default(),
        })
    }

    /// Fragt den RX-FIFO einmal ab
    ///
    /// Nach Ablauf der Frist geht der Chip in IDLE und die Session endet mit
    /// [`LearnStep::Finished`]. Bis dahin gelernte Adressen bleiben erhalten.
    /// Bei einem Transport-Fehler endet die Session ebenfalls (Chip in IDLE).
    pub fn poll_learning(
        &mut self,
        session: &mut LearnSession,
        now_ms: u64,
    ) -> Result<LearnStep, LampError> {
        if session.state == LearnState::Idle {
            return Ok(LearnStep::Finished(session.report));
        }

        let step = self.poll_receiver(session, now_ms);
        if step.is_err() {
            // Fehler des ursprünglichen Zugriffs hat Vorrang
            let _ = self.transport.send_strobe_command(SIDLE);
            session.state = LearnState::Idle;
        }
        step
    }

    fn poll_receiver(
        &mut self,
        session: &mut LearnSession,
        now_ms: u64,
    ) -> Result<LearnStep, LampError> {
        if now_ms >= session.deadline_ms {
            self.transport.send_strobe_command(SIDLE)?;
            session.state = LearnState::Idle;
            return Ok(LearnStep::Finished(session.report));
        }

        let rx_status = self.transport.send_command(RXBYTES | READ_BURST, 0x00)?;
        if rx_status & FIFO_OVERFLOW != 0 {
            self.restart_receiver()?;
            session.pending_bytes = 0;
            session.report.ignored = session.report.ignored.saturating_add(1);
            return Ok(LearnStep::Ignored);
        }

        let available = rx_status & FIFO_BYTES_MASK;
        if available == 0 {
            session.pending_bytes = 0;
            return Ok(LearnStep::Waiting);
        }
        if usize::from(available) < RX_PACKET_LEN {
            // Paket kommt noch rein, solange die Byte-Anzahl weiter wächst
            if available != session.pending_bytes {
                session.pending_bytes = available;
                session.pending_since_ms = now_ms;
                return Ok(LearnStep::Waiting);
            }
            if now_ms.saturating_sub(session.pending_since_ms) < RX_STALL_MS {
                return Ok(LearnStep::Waiting);
            }
        }
        session.pending_bytes = 0;

        let len = usize::from(available).min(RX_FIFO_LEN);
        let mut raw = [0u8; RX_FIFO_LEN];
        self.transport
            .send_burst_command(FIFO | READ_BURST, &mut raw[..len])?;
        self.restart_receiver()?;

        match ObservedFrame::parse(&raw[..len]) {
            Some(observed) => Ok(self.capture(session, observed)),
            None => {
                session.report.ignored = session.report.ignored.saturating_add(1);
                Ok(LearnStep::Ignored)
            }
        }
    }

    /// Lernt Lampen-Adressen für [`LEARN_DURATION_MS`] (blockierend)
    ///
    /// Während der Lern-Phase die Original-Fernbedienung nah ans Board halten
    /// und ein paar Kommandos senden (Farbe ändern, aus, an).
    pub fn learn_lamps<C: Clock>(&mut self, clock: &C) -> Result<LearnReport, LampError> {
        let mut session = self.begin_learning(clock.now_ms())?;
        loop {
            if let LearnStep::Finished(report) = self.poll_learning(&mut session, clock.now_ms())? {
                return Ok(report);
            }
        }
    }

    fn capture(&mut self, session: &mut LearnSession, observed: ObservedFrame) -> LearnStep {
        let report = &mut session.report;
        report.frames = report.frames.saturating_add(1);

        let known = self.book.count();
        match self.book.insert(observed.address) {
            Ok(index) => {
                self.sequence = observed.sequence;
                let new = self.book.count() > known;
                if new {
                    report.added = report.added.saturating_add(1);
                } else {
                    report.refreshed = report.refreshed.saturating_add(1);
                }
                LearnStep::Captured {
                    index,
                    new,
                    sequence: observed.sequence,
                }
            }
            Err(_) => {
                report.discarded = report.discarded.saturating_add(1);
                LearnStep::Discarded
            }
        }
    }

    fn restart_receiver(&mut self) -> Result<(), LampError> {
        self.transport.send_strobe_command(SIDLE)?;
        self.transport.send_strobe_command(SFRX)?;
        self.transport.send_strobe_command(SRX)?;
        Ok(())
    }
}
