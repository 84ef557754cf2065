// Library-Root: Tasks, Hardware-Anbindung und Web-Oberfläche
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von lc-core
pub use lc_core::{
    CommandOutcome, Hsv, LampAddress, LampCommand, LampError, LampRequest, LampStatusMessage,
    LearnReport, LivingColors, RequestError, RequestKind,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

use crate::config::LAMP_COMMAND_QUEUE_LEN;

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  Publisher<'static, NoopRawMutex, LampStatusMessage, 4, 10, 1>
// Nutze:  LampStatusPublisher

/// Kapazität des Status-Broadcasts
/// 4 statt 2: während eines Lern-Durchlaufs kommen Captures schnell hintereinander
pub const STATUS_CAPACITY: usize = 4;

/// Maximale Anzahl Subscribers (1 MQTT + bis zu 9 WebSockets)
pub const STATUS_SUBSCRIBERS: usize = 10;

/// PubSubChannel für Lampen-Status-Broadcasts (Lampen-Task → MQTT + HTTP)
pub type LampStatusChannel =
    PubSubChannel<NoopRawMutex, LampStatusMessage, STATUS_CAPACITY, STATUS_SUBSCRIBERS, 1>;

/// Publisher für Lampen-Status-Broadcasts
pub type LampStatusPublisher =
    Publisher<'static, NoopRawMutex, LampStatusMessage, STATUS_CAPACITY, STATUS_SUBSCRIBERS, 1>;

/// Subscriber für Lampen-Status-Broadcasts
pub type LampStatusSubscriber =
    Subscriber<'static, NoopRawMutex, LampStatusMessage, STATUS_CAPACITY, STATUS_SUBSCRIBERS, 1>;

/// Channel für Lampen-Kommandos (WebSocket → Lampen-Task)
pub type LampCommandChannel = Channel<NoopRawMutex, LampCommand, LAMP_COMMAND_QUEUE_LEN>;

/// Sender für Lampen-Kommandos
pub type LampCommandSender = Sender<'static, NoopRawMutex, LampCommand, LAMP_COMMAND_QUEUE_LEN>;

/// Receiver für Lampen-Kommandos (Lampen-Task empfängt)
pub type LampCommandReceiver =
    Receiver<'static, NoopRawMutex, LampCommand, LAMP_COMMAND_QUEUE_LEN>;
