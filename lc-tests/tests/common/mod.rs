//! Mock-Implementierungen für Host-Tests
//!
//! MockTransport simuliert den CC2500: zeichnet alle Zugriffe auf und liefert
//! vorbereitete Pakete über den RX-FIFO aus.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use lc_core::registers::{FIFO, READ_BURST, RXBYTES, SFRX, TXBYTES, WRITE_BURST};
use lc_core::{Cc2500Transport, Clock, LampAddress, TransportError};

/// Aufgezeichneter Transport-Zugriff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Init,
    Reset,
    Byte(u8),
    Command(u8, u8),
    Burst(u8, Vec<u8>),
}

#[derive(Default)]
pub struct MockTransport {
    pub ops: Vec<Op>,
    /// Pakete, die nacheinander im RX-FIFO erscheinen
    pub rx_packets: VecDeque<Vec<u8>>,
    rx_fifo: Vec<u8>,
    /// TX-FIFO wird nie leer
    pub stuck_tx: bool,
    /// Nächste RXBYTES-Abfrage meldet Überlauf
    pub rx_overflow_next: bool,
    /// Simuliere Fehler beim nächsten Zugriff
    pub fail_next: Option<TransportError>,
    /// Pakete laufen byteweise ein: ein Byte pro `n` RXBYTES-Abfragen
    pub rx_trickle_every: Option<u32>,
    rx_in_flight: VecDeque<u8>,
    rx_polls: u32,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packets(packets: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            rx_packets: packets.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Pakete erscheinen langsam im RX-FIFO, wie beim echten Empfang
    pub fn with_trickled_packets(every: u32, packets: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            rx_trickle_every: Some(every),
            ..Self::with_packets(packets)
        }
    }

    fn fill_rx_fifo(&mut self) {
        match self.rx_trickle_every {
            None => {
                if self.rx_fifo.is_empty() {
                    if let Some(packet) = self.rx_packets.pop_front() {
                        self.rx_fifo = packet;
                    }
                }
            }
            Some(every) => {
                if self.rx_fifo.is_empty() && self.rx_in_flight.is_empty() {
                    if let Some(packet) = self.rx_packets.pop_front() {
                        self.rx_in_flight = packet.into();
                    }
                }
                self.rx_polls += 1;
                if self.rx_polls % every == 0 {
                    if let Some(byte) = self.rx_in_flight.pop_front() {
                        self.rx_fifo.push(byte);
                    }
                }
            }
        }
    }

    /// Alle in den TX-FIFO geschriebenen Frames
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Burst(cmd, data) if *cmd == FIFO | WRITE_BURST => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Alle Einzel-Bytes (Strobes) in Reihenfolge
    pub fn strobes(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Byte(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    fn check_failure(&mut self) -> Result<(), TransportError> {
        match self.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Cc2500Transport for MockTransport {
    fn init(&mut self) -> Result<(), TransportError> {
        self.check_failure()?;
        self.ops.push(Op::Init);
        Ok(())
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.check_failure()?;
        self.ops.push(Op::Reset);
        Ok(())
    }

    fn send_byte(&mut self, data: u8) -> Result<u8, TransportError> {
        self.check_failure()?;
        self.ops.push(Op::Byte(data));
        if data == SFRX {
            // bricht auch ein gerade empfangenes Paket ab
            self.rx_fifo.clear();
            self.rx_in_flight.clear();
        }
        Ok(0x0F)
    }

    fn send_command(&mut self, command: u8, data: u8) -> Result<u8, TransportError> {
        self.check_failure()?;
        self.ops.push(Op::Command(command, data));

        if command == RXBYTES | READ_BURST {
            self.fill_rx_fifo();
            let count = self.rx_fifo.len() as u8;
            if self.rx_overflow_next {
                self.rx_overflow_next = false;
                return Ok(0x80 | count);
            }
            return Ok(count);
        }
        if command == TXBYTES | READ_BURST {
            return Ok(if self.stuck_tx { 15 } else { 0 });
        }
        Ok(0x00)
    }

    fn send_burst_command(
        &mut self,
        command: u8,
        buffer: &mut [u8],
    ) -> Result<u8, TransportError> {
        self.check_failure()?;
        self.ops.push(Op::Burst(command, buffer.to_vec()));

        if command == FIFO | READ_BURST {
            let n = buffer.len().min(self.rx_fifo.len());
            buffer[..n].copy_from_slice(&self.rx_fifo[..n]);
            self.rx_fifo.drain(..n);
        }
        Ok(buffer.last().copied().unwrap_or(0))
    }
}

/// Uhr, die bei jeder Abfrage um `step_ms` weiterläuft
pub struct MockClock {
    now: Cell<u64>,
    step_ms: u64,
}

impl MockClock {
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
            step_ms,
        }
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }
}

pub fn address(n: u8) -> LampAddress {
    LampAddress::from_parts([0x10, 0x20, 0x30, n], [0xC0, 0xC1, 0xC2, 0xC3, 0xC4])
}

/// Paket, wie es die Original-Fernbedienung sendet (inkl. RSSI und LQI)
pub fn remote_packet(address: LampAddress, opcode: u8, sequence: u8) -> Vec<u8> {
    let mut packet = vec![0x0E];
    packet.extend_from_slice(address.as_bytes());
    packet.extend_from_slice(&[opcode, sequence, 0x40, 0xFF, 0xFF]);
    // RSSI, LQI mit CRC_OK
    packet.extend_from_slice(&[0x3C, 0x80 | 0x2A]);
    packet
}
