//! LivingColors Kommando-Frames
//!
//! Aufbau im TX-FIFO (das Längen-Byte zählt die folgenden Bytes):
//!
//! ```text
//! [0]      Länge (0x0E)
//! [1..=4]  Lampen-Kennung
//! [5..=9]  Fernbedienungs-Kennung
//! [10]     Opcode
//! [11]     Sequenznummer
//! [12..15] Hue (Lampen-Kodierung), Sättigung, Helligkeit
//! ```
//!
//! Empfangene Pakete tragen zusätzlich RSSI und LQI, die der CC2500 anhängt.

use crate::logic::lamp_hue;
use crate::registers::LQI_CRC_OK;
use crate::types::{ADDRESS_LEN, Hsv, LampAddress, Opcode};

/// Nutzdaten-Länge hinter dem Längen-Byte
pub const FRAME_PAYLOAD_LEN: u8 = 0x0E;
/// Bytes, die in den TX-FIFO geschrieben werden
pub const TX_FRAME_LEN: usize = 1 + FRAME_PAYLOAD_LEN as usize;
/// Bytes eines vollständigen Pakets im RX-FIFO (inkl. RSSI, LQI)
pub const RX_PACKET_LEN: usize = TX_FRAME_LEN + 2;

const OPCODE_OFFSET: usize = 1 + ADDRESS_LEN;
const SEQUENCE_OFFSET: usize = OPCODE_OFFSET + 1;
const COLOUR_OFFSET: usize = SEQUENCE_OFFSET + 1;

/// Ausgehender Kommando-Frame, wird pro Sendung gebaut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    pub target: LampAddress,
    pub sequence: u8,
    pub opcode: Opcode,
    pub colour: Hsv,
}

impl CommandFrame {
    pub fn new(target: LampAddress, sequence: u8, opcode: Opcode, colour: Hsv) -> Self {
        Self {
            target,
            sequence,
            opcode,
            colour,
        }
    }

    /// Serialisiert den Frame für den TX-FIFO
    ///
    /// Hue wird in die Lampen-Kodierung umgerechnet; `Off` sendet Null-Bytes.
    pub fn encode(&self) -> [u8; TX_FRAME_LEN] {
        let mut buffer = [0u8; TX_FRAME_LEN];
        buffer[0] = FRAME_PAYLOAD_LEN;
        buffer[1..OPCODE_OFFSET].copy_from_slice(self.target.as_bytes());
        buffer[OPCODE_OFFSET] = self.opcode.into();
        buffer[SEQUENCE_OFFSET] = self.sequence;
        if self.opcode.carries_colour() {
            buffer[COLOUR_OFFSET] = lamp_hue(self.colour.h);
            buffer[COLOUR_OFFSET + 1] = self.colour.s;
            buffer[COLOUR_OFFSET + 2] = self.colour.v;
        }
        buffer
    }
}

/// Mitgeschnittener Frame der Original-Fernbedienung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedFrame {
    pub address: LampAddress,
    pub sequence: u8,
    pub opcode: u8,
}

impl ObservedFrame {
    /// Prüft ein Paket aus dem RX-FIFO
    ///
    /// Liefert `None` bei falscher Länge, fehlerhafter CRC oder einem
    /// Opcode außerhalb des Kommando-Bereichs.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        if raw.len() != RX_PACKET_LEN || raw[0] != FRAME_PAYLOAD_LEN {
            return None;
        }
        let lqi = raw[RX_PACKET_LEN - 1];
        if lqi & LQI_CRC_OK == 0 {
            return None;
        }
        let opcode = raw[OPCODE_OFFSET];
        if !is_command_opcode(opcode) {
            return None;
        }
        let address = LampAddress::try_from(&raw[1..OPCODE_OFFSET]).ok()?;
        Some(Self {
            address,
            sequence: raw[SEQUENCE_OFFSET],
            opcode,
        })
    }
}

/// Opcodes, die die Fernbedienung an Lampen sendet
///
/// Neben 3/5/7 kennt die Fernbedienung weitere Kommandos (z.B. Kopplung),
/// ihre Frames tragen ebenfalls Adresse und Sequenznummer.
fn is_command_opcode(opcode: u8) -> bool {
    (0x01..=0x07).contains(&opcode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: LampAddress =
        LampAddress::new([0xA1, 0xA2, 0xA3, 0xA4, 0xB1, 0xB2, 0xB3, 0xB4, 0xB5]);

    #[test]
    fn test_encode_layout() {
        let colour = Hsv::new(0x10, 0x20, 0x30);
        let frame = CommandFrame::new(ADDRESS, 0x42, Opcode::SetColour, colour);
        let bytes = frame.encode();
        assert_eq!(bytes.len(), 15);
        assert_eq!(bytes[0], 0x0E);
        assert_eq!(&bytes[1..10], ADDRESS.as_bytes());
        assert_eq!(bytes[10], 0x03);
        assert_eq!(bytes[11], 0x42);
        assert_eq!(bytes[12], lamp_hue(0x10));
        assert_eq!(bytes[13], 0x20);
        assert_eq!(bytes[14], 0x30);
    }

    #[test]
    fn test_encode_off_clears_colour() {
        let frame = CommandFrame::new(ADDRESS, 1, Opcode::Off, Hsv::new(9, 9, 9));
        assert_eq!(&frame.encode()[12..], &[0, 0, 0]);
    }

    fn packet(opcode: u8, sequence: u8, lqi: u8) -> [u8; RX_PACKET_LEN] {
        let mut raw = [0u8; RX_PACKET_LEN];
        raw[..TX_FRAME_LEN].copy_from_slice(
            &CommandFrame::new(ADDRESS, sequence, Opcode::On, Hsv::default()).encode(),
        );
        raw[10] = opcode;
        raw[15] = 0x40;
        raw[16] = lqi;
        raw
    }

    #[test]
    fn test_parse_valid_packet() {
        let observed = ObservedFrame::parse(&packet(0x05, 0x99, 0x80 | 0x20)).unwrap();
        assert_eq!(observed.address, ADDRESS);
        assert_eq!(observed.sequence, 0x99);
        assert_eq!(observed.opcode, 0x05);
    }

    #[test]
    fn test_parse_rejects_crc_error() {
        assert_eq!(ObservedFrame::parse(&packet(0x05, 1, 0x20)), None);
    }

    #[test]
    fn test_parse_rejects_unknown_opcode() {
        assert_eq!(ObservedFrame::parse(&packet(0x00, 1, 0x80)), None);
        assert_eq!(ObservedFrame::parse(&packet(0x11, 1, 0x80)), None);
    }

    #[test]
    fn test_parse_rejects_short_and_wrong_length() {
        let raw = packet(0x05, 1, 0x80);
        assert_eq!(ObservedFrame::parse(&raw[..RX_PACKET_LEN - 1]), None);

        let mut raw = raw;
        raw[0] = 0x0D;
        assert_eq!(ObservedFrame::parse(&raw), None);
    }
}
