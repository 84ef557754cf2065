//! Core Types für die LivingColors-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

use crate::traits::LampError;

/// Länge einer Lampen-Adresse in Bytes (4 Byte Lampe + 5 Byte Fernbedienung)
pub const ADDRESS_LEN: usize = 9;

/// Lampen-Adresse
///
/// Die ersten 4 Bytes identifizieren die Lampe, die letzten 5 Bytes die
/// gekoppelte Fernbedienung. Zwei Adressen sind gleich, wenn alle 9 Bytes
/// übereinstimmen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LampAddress([u8; ADDRESS_LEN]);

impl LampAddress {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Baut eine Adresse aus Lampen- und Fernbedienungs-Kennung zusammen
    pub fn from_parts(lamp: [u8; 4], remote: [u8; 5]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[..4].copy_from_slice(&lamp);
        bytes[4..].copy_from_slice(&remote);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn lamp_id(&self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], self.0[3]]
    }

    pub fn remote_id(&self) -> [u8; 5] {
        [self.0[4], self.0[5], self.0[6], self.0[7], self.0[8]]
    }
}

impl From<[u8; ADDRESS_LEN]> for LampAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl core::convert::TryFrom<&[u8]> for LampAddress {
    type Error = ();

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| ())?;
        Ok(Self(bytes))
    }
}

/// Parst 18 Hex-Ziffern (z.B. aus dem Browser), Groß-/Kleinschreibung egal
impl core::str::FromStr for LampAddress {
    type Err = ();

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let digits = text.as_bytes();
        if digits.len() != ADDRESS_LEN * 2 || !digits.iter().all(u8::is_ascii_hexdigit) {
            return Err(());
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            let pair = core::str::from_utf8(pair).map_err(|_| ())?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| ())?;
        }
        Ok(Self(bytes))
    }
}

impl core::fmt::Display for LampAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Farbe im HSV-Farbraum (je Kanal 0-255)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Opcode eines LivingColors Kommando-Frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    SetColour = 0x03,
    On = 0x05,
    Off = 0x07,
}

impl Opcode {
    /// Ob der Frame Farbwerte transportiert (Off sendet feste Null-Bytes)
    pub fn carries_colour(self) -> bool {
        !matches!(self, Opcode::Off)
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode as u8
    }
}

impl core::convert::TryFrom<u8> for Opcode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x03 => Ok(Self::SetColour),
            0x05 => Ok(Self::On),
            0x07 => Ok(Self::Off),
            _ => Err(()),
        }
    }
}

/// Zusammenfassung eines Lern-Durchlaufs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearnReport {
    /// Erkannte Kommando-Frames der Fernbedienung
    pub frames: u16,
    /// Neu gespeicherte Adressen
    pub added: u8,
    /// Frames bekannter Lampen (Sequenznummer übernommen)
    pub refreshed: u16,
    /// Neue Adressen, die wegen vollem Adressbuch verworfen wurden
    pub discarded: u16,
    /// Kaputte, zu kurze oder fremde Pakete
    pub ignored: u16,
}

/// Lampen-Kommando für die Steuerung
///
/// Wird vom WebSocket an den Lampen-Task gesendet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampCommand {
    /// Adressen von der Original-Fernbedienung lernen
    Learn,
    /// Alle gespeicherten Adressen löschen
    Clear,
    /// Adresse manuell hinzufügen
    AddLamp { address: LampAddress },
    SetColourRgb { index: u8, colour: RGB8 },
    SetColourHsv { index: u8, colour: Hsv },
    TurnOnRgb { index: u8, colour: RGB8 },
    TurnOnHsv { index: u8, colour: Hsv },
    TurnOff { index: u8 },
}

/// Ergebnis eines ausgeführten Lampen-Kommandos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Frame wurde gesendet
    Sent {
        index: u8,
        opcode: Opcode,
        sequence: u8,
    },
    /// Adresse liegt im Adressbuch an diesem Index
    Stored { index: u8 },
    Cleared,
    /// Lern-Modus läuft
    Listening,
    /// Frame der Fernbedienung mitgeschnitten
    Captured { index: u8, new: bool },
    Learned(LearnReport),
}

/// Lampen-Status Message für Channel-Kommunikation
///
/// Wird nach jedem Kommando vom Lampen-Task an HTTP und MQTT verteilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampStatusMessage {
    pub num_lamps: u8,
    pub max_lamps: u8,
    pub sequence: u8,
    pub learning: bool,
    pub outcome: Result<CommandOutcome, LampError>,
}

impl LampStatusMessage {
    /// Kurzname des Ergebnisses für Logs und MQTT
    pub fn outcome_name(&self) -> &'static str {
        match self.outcome {
            Ok(CommandOutcome::Sent { opcode, .. }) => match opcode {
                Opcode::SetColour => "colour",
                Opcode::On => "on",
                Opcode::Off => "off",
            },
            Ok(CommandOutcome::Stored { .. }) => "stored",
            Ok(CommandOutcome::Cleared) => "cleared",
            Ok(CommandOutcome::Listening) => "listening",
            Ok(CommandOutcome::Captured { .. }) => "captured",
            Ok(CommandOutcome::Learned(_)) => "learned",
            Err(LampError::InvalidIndex) => "invalid_index",
            Err(LampError::Full) => "full",
            Err(LampError::Transport(_)) => "transport_error",
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for LampAddress {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "lamp {=[u8]:x} remote {=[u8]:x}",
            &self.0[..4],
            &self.0[4..]
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Hsv {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Hsv({}, {}, {})", self.h, self.s, self.v)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Opcode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Opcode::SetColour => defmt::write!(fmt, "SetColour"),
            Opcode::On => defmt::write!(fmt, "On"),
            Opcode::Off => defmt::write!(fmt, "Off"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LearnReport {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "LearnReport {{ frames: {}, added: {}, refreshed: {}, discarded: {}, ignored: {} }}",
            self.frames,
            self.added,
            self.refreshed,
            self.discarded,
            self.ignored
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LampCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LampCommand::Learn => defmt::write!(fmt, "Learn"),
            LampCommand::Clear => defmt::write!(fmt, "Clear"),
            LampCommand::AddLamp { address } => defmt::write!(fmt, "AddLamp {}", address),
            LampCommand::SetColourRgb { index, colour } => defmt::write!(
                fmt,
                "SetColourRgb {{ index: {}, rgb: ({}, {}, {}) }}",
                index,
                colour.r,
                colour.g,
                colour.b
            ),
            LampCommand::SetColourHsv { index, colour } => {
                defmt::write!(fmt, "SetColourHsv {{ index: {}, {} }}", index, colour)
            }
            LampCommand::TurnOnRgb { index, colour } => defmt::write!(
                fmt,
                "TurnOnRgb {{ index: {}, rgb: ({}, {}, {}) }}",
                index,
                colour.r,
                colour.g,
                colour.b
            ),
            LampCommand::TurnOnHsv { index, colour } => {
                defmt::write!(fmt, "TurnOnHsv {{ index: {}, {} }}", index, colour)
            }
            LampCommand::TurnOff { index } => defmt::write!(fmt, "TurnOff {{ index: {} }}", index),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CommandOutcome::Sent {
                index,
                opcode,
                sequence,
            } => defmt::write!(
                fmt,
                "Sent {{ index: {}, opcode: {}, sequence: {} }}",
                index,
                opcode,
                sequence
            ),
            CommandOutcome::Stored { index } => defmt::write!(fmt, "Stored {{ index: {} }}", index),
            CommandOutcome::Cleared => defmt::write!(fmt, "Cleared"),
            CommandOutcome::Listening => defmt::write!(fmt, "Listening"),
            CommandOutcome::Captured { index, new } => {
                defmt::write!(fmt, "Captured {{ index: {}, new: {} }}", index, new)
            }
            CommandOutcome::Learned(report) => defmt::write!(fmt, "Learned {}", report),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LampStatusMessage {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "LampStatusMessage {{ lamps: {}/{}, sequence: {}, learning: {}, outcome: {} }}",
            self.num_lamps,
            self.max_lamps,
            self.sequence,
            self.learning,
            self.outcome_name()
        )
    }
}
