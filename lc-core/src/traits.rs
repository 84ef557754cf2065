//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für den Funk-Chip und die Zeitbasis
//! ohne konkrete Implementierung.

use core::fmt;

/// Fehler-Typ für Transport-Operationen (SPI zum CC2500)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Chip hat nicht innerhalb der Wartezeit "ready" signalisiert
    Timeout,
    /// SPI- oder GPIO-Zugriff fehlgeschlagen
    Bus,
}

/// Fehler-Typ für Lampen-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampError {
    /// Index liegt nicht in `[0, num_lamps)`
    InvalidIndex,
    /// Adressbuch ist voll
    Full,
    Transport(TransportError),
}

impl From<TransportError> for LampError {
    fn from(error: TransportError) -> Self {
        LampError::Transport(error)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransportError::Timeout => write!(f, "transceiver did not become ready"),
            TransportError::Bus => write!(f, "SPI bus error"),
        }
    }
}

impl fmt::Display for LampError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LampError::InvalidIndex => write!(f, "invalid lamp index"),
            LampError::Full => write!(f, "address book is full"),
            LampError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TransportError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TransportError::Timeout => defmt::write!(fmt, "Timeout"),
            TransportError::Bus => defmt::write!(fmt, "Bus"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LampError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LampError::InvalidIndex => defmt::write!(fmt, "InvalidIndex"),
            LampError::Full => defmt::write!(fmt, "Full"),
            LampError::Transport(e) => defmt::write!(fmt, "Transport({})", e),
        }
    }
}

/// Trait für den Byte-Kanal zum CC2500 Funk-Chip
///
/// Jede Operation wählt den Chip an, wartet (begrenzt) auf CHIP_RDYn,
/// überträgt und wählt den Chip wieder ab.
///
/// # Implementierungen
/// - **Production:** `Cc2500Spi` (SPI + CS + Ready-Pin, in lc-firmware)
/// - **Testing:** `MockTransport` (in-memory Mock, in lc-tests)
pub trait Cc2500Transport {
    /// Schreibt die Register-Konfiguration (Kanal, Modulation, Paketformat)
    fn init(&mut self) -> Result<(), TransportError>;

    /// Führt die Reset-Sequenz des Chips aus (SRES)
    fn reset(&mut self) -> Result<(), TransportError>;

    /// Sendet ein einzelnes Byte, liefert das Status-Byte zurück
    fn send_byte(&mut self, data: u8) -> Result<u8, TransportError>;

    /// Sendet Header + Daten-Byte, liefert das zweite empfangene Byte
    fn send_command(&mut self, command: u8, data: u8) -> Result<u8, TransportError>;

    /// Burst-Transfer: schreibt `buffer` und überschreibt ihn mit den
    /// empfangenen Bytes (Vollduplex). Liefert das zuletzt empfangene Byte.
    fn send_burst_command(&mut self, command: u8, buffer: &mut [u8])
    -> Result<u8, TransportError>;

    /// Strobe-Kommando (SIDLE, STX, SRX, ...)
    fn send_strobe_command(&mut self, command: u8) -> Result<u8, TransportError> {
        self.send_byte(command)
    }
}

/// Monotone Zeitbasis in Millisekunden
pub trait Clock {
    fn now_ms(&self) -> u64;
}
