//! LivingColors Core - Platform-agnostic Protocol Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Adressbuch, Frame-Format, Protokoll-Engine, Lern-Modus,
//! die Übersetzung von Browser-Anfragen und die Traits für Transport und
//! Zeitbasis.

#![no_std]

pub mod address_book;
pub mod frame;
pub mod learn;
pub mod logic;
pub mod protocol;
pub mod registers;
pub mod request;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use address_book::{AddressBook, MAX_LAMPS};
pub use frame::{CommandFrame, ObservedFrame, RX_PACKET_LEN, TX_FRAME_LEN};
pub use learn::{LEARN_DURATION_MS, LearnSession, LearnState, LearnStep, RX_STALL_MS};
pub use logic::{HUE_OFFSET, lamp_hue, rgb_to_hsv};
pub use protocol::LivingColors;
pub use request::{LampRequest, RequestError, RequestKind};
pub use traits::{Cc2500Transport, Clock, LampError, TransportError};
pub use types::{
    CommandOutcome, Hsv, LampAddress, LampCommand, LampStatusMessage, LearnReport, Opcode,
};
