// WebSocket-Protokoll-Definitionen
// Definiert die JSON-Nachrichten für Client ↔ Server Kommunikation

use rgb::RGB8;
use serde::{Deserialize, Serialize};

use crate::{
    CommandOutcome, Hsv, LampCommand, LampError, LampRequest, LampStatusMessage, RequestError,
    RequestKind,
};

/// RGB-Struct für JSON-Serialisierung (0-255 je Kanal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSV-Struct für JSON-Serialisierung (0-255 je Kanal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvColor {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Client → Server Nachrichten
///
/// Flache Struktur mit optionalen Feldern für serde-json-core, z.B.
/// `{"type":"set_colour","lamp":0,"rgb":{"r":255,"g":0,"b":0}}` oder
/// `{"type":"add_lamp","address":"0102030405060708ff"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WsClientMessage<'a> {
    #[serde(rename = "type")]
    pub msg_type: RequestKind,
    #[serde(default)]
    pub lamp: Option<u8>,
    #[serde(default)]
    pub rgb: Option<RgbColor>,
    #[serde(default)]
    pub hsv: Option<HsvColor>,
    #[serde(default, borrow)]
    pub address: Option<&'a str>,
}

impl WsClientMessage<'_> {
    /// Übersetzt die Nachricht in ein Kommando für den Lampen-Task
    pub fn to_command(&self) -> Result<LampCommand, RequestError> {
        LampRequest {
            kind: self.msg_type,
            lamp: self.lamp,
            rgb: self.rgb.map(|c| RGB8::new(c.r, c.g, c.b)),
            hsv: self.hsv.map(|c| Hsv::new(c.h, c.s, c.v)),
            address: self.address,
        }
        .to_command()
    }
}

/// Server → Client Nachrichten
/// Status-Updates und Fehler vom ESP32 an den Browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum WsServerMessage {
    #[serde(rename = "status")]
    Status {
        num_lamps: u8,
        max_lamps: u8,
        sequence: u8,
        learning: bool,
        /// Kurzname des Ergebnisses (siehe `LampStatusMessage::outcome_name`)
        event: &'static str,
        /// Betroffene Lampe, falls das Ergebnis eine hat
        lamp: Option<u8>,
        /// Neu gelernte Lampen, nur nach einem Lern-Durchlauf
        added: Option<u8>,
    },
    #[serde(rename = "error")]
    Error { message: &'static str },
}

impl From<&LampStatusMessage> for WsServerMessage {
    fn from(status: &LampStatusMessage) -> Self {
        let (lamp, added) = match status.outcome {
            Ok(CommandOutcome::Sent { index, .. })
            | Ok(CommandOutcome::Stored { index })
            | Ok(CommandOutcome::Captured { index, .. }) => (Some(index), None),
            Ok(CommandOutcome::Learned(report)) => (None, Some(report.added)),
            Ok(CommandOutcome::Cleared)
            | Ok(CommandOutcome::Listening)
            | Err(LampError::InvalidIndex)
            | Err(LampError::Full)
            | Err(LampError::Transport(_)) => (None, None),
        };

        WsServerMessage::Status {
            num_lamps: status.num_lamps,
            max_lamps: status.max_lamps,
            sequence: status.sequence,
            learning: status.learning,
            event: status.outcome_name(),
            lamp,
            added,
        }
    }
}
