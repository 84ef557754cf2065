//! LivingColors Protokoll-Engine
//!
//! Besitzt Transport, Adressbuch und den Sequenzzähler. Der Zähler ist
//! global für alle Lampen und wird vor jedem gesendeten Frame erhöht.

use rgb::RGB8;

use crate::address_book::{AddressBook, MAX_LAMPS};
use crate::frame::CommandFrame;
use crate::logic::rgb_to_hsv;
use crate::registers::{FIFO, FIFO_BYTES_MASK, READ_BURST, SFTX, SIDLE, STX, TXBYTES, WRITE_BURST};
use crate::traits::{Cc2500Transport, Clock, LampError, TransportError};
use crate::types::{CommandOutcome, Hsv, LampAddress, LampCommand, LampStatusMessage, Opcode};

/// Maximale Anzahl TXBYTES-Abfragen, bis der TX-FIFO leer sein muss
pub const TX_DRAIN_POLLS: u16 = 2000;

/// Steuert LivingColors Lampen über einen CC2500 Transport
///
/// Die Engine ist exklusiver Besitzer der Hardware und deshalb weder
/// `Clone` noch `Copy`. Nicht reentrant: Aufrufe aus mehreren Tasks müssen
/// von außen serialisiert werden (z.B. ein einzelner Lampen-Task).
pub struct LivingColors<T, const N: usize = MAX_LAMPS> {
    pub(crate) transport: T,
    pub(crate) book: AddressBook<N>,
    pub(crate) sequence: u8,
}

impl<T: Cc2500Transport, const N: usize> LivingColors<T, N> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            book: AddressBook::new(),
            sequence: 0,
        }
    }

    /// Setzt den Chip zurück, lädt die Register und setzt den Sequenzzähler zurück
    pub fn init(&mut self) -> Result<(), LampError> {
        self.transport.reset()?;
        self.transport.init()?;
        self.sequence = 0;
        Ok(())
    }

    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    pub fn address_book(&self) -> &AddressBook<N> {
        &self.book
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Gibt den Transport wieder frei
    pub fn release(self) -> T {
        self.transport
    }

    // -----------------------------------------------------------------------
    // Adressverwaltung
    // -----------------------------------------------------------------------

    pub fn max_num_lamps(&self) -> u8 {
        self.book.capacity()
    }

    pub fn num_lamps(&self) -> u8 {
        self.book.count()
    }

    /// Fügt eine Adresse hinzu und liefert den Lampen-Index
    pub fn add_lamp(&mut self, address: LampAddress) -> Result<u8, LampError> {
        self.book.insert(address)
    }

    pub fn get_lamp(&self, index: u8) -> Option<LampAddress> {
        self.book.get(index)
    }

    pub fn clear_lamps(&mut self) {
        self.book.clear();
    }

    // -----------------------------------------------------------------------
    // Kommandos
    // -----------------------------------------------------------------------

    /// Sendet ein Kommando an die Lampe mit dem gegebenen Index
    ///
    /// Bei ungültigem Index wird nichts gesendet und der Zähler bleibt
    /// unverändert. Liefert die im Frame verwendete Sequenznummer.
    pub fn send_command(
        &mut self,
        index: u8,
        opcode: Opcode,
        colour: Hsv,
    ) -> Result<u8, LampError> {
        let target = self.book.get(index).ok_or(LampError::InvalidIndex)?;

        self.sequence = self.sequence.wrapping_add(1);
        let mut buffer = CommandFrame::new(target, self.sequence, opcode, colour).encode();

        self.transport.send_strobe_command(SIDLE)?;
        self.transport.send_strobe_command(SFTX)?;
        self.transport.send_burst_command(FIFO | WRITE_BURST, &mut buffer)?;
        self.transport.send_strobe_command(STX)?;
        self.wait_tx_drained()?;

        Ok(self.sequence)
    }

    /// Wartet, bis der Chip den TX-FIFO ausgesendet hat
    fn wait_tx_drained(&mut self) -> Result<(), TransportError> {
        for _ in 0..TX_DRAIN_POLLS {
            let tx_bytes = self.transport.send_command(TXBYTES | READ_BURST, 0x00)?;
            if tx_bytes & FIFO_BYTES_MASK == 0 {
                return Ok(());
            }
        }
        Err(TransportError::Timeout)
    }

    pub fn set_colour(&mut self, index: u8, colour: Hsv) -> Result<u8, LampError> {
        self.send_command(index, Opcode::SetColour, colour)
    }

    pub fn turn_on(&mut self, index: u8, colour: Hsv) -> Result<u8, LampError> {
        self.send_command(index, Opcode::On, colour)
    }

    pub fn turn_off(&mut self, index: u8) -> Result<u8, LampError> {
        self.send_command(index, Opcode::Off, Hsv::default())
    }

    pub fn set_lamp_colour_rgb(&mut self, index: u8, colour: RGB8) -> Result<u8, LampError> {
        self.set_colour(index, rgb_to_hsv(colour))
    }

    pub fn set_lamp_colour_hsv(&mut self, index: u8, colour: Hsv) -> Result<u8, LampError> {
        self.set_colour(index, colour)
    }

    pub fn turn_lamp_on_rgb(&mut self, index: u8, colour: RGB8) -> Result<u8, LampError> {
        self.turn_on(index, rgb_to_hsv(colour))
    }

    pub fn turn_lamp_on_hsv(&mut self, index: u8, colour: Hsv) -> Result<u8, LampError> {
        self.turn_on(index, colour)
    }

    pub fn turn_lamp_off(&mut self, index: u8) -> Result<u8, LampError> {
        self.turn_off(index)
    }

    // -----------------------------------------------------------------------
    // Kommando-Dispatch für die Firmware-Tasks
    // -----------------------------------------------------------------------

    /// Führt ein [`LampCommand`] aus
    ///
    /// `Learn` blockiert für die komplette Lern-Dauer, siehe
    /// [`LivingColors::learn_lamps`].
    pub fn execute<C: Clock>(
        &mut self,
        command: LampCommand,
        clock: &C,
    ) -> Result<CommandOutcome, LampError> {
        let sent = |index: u8, opcode: Opcode| {
            move |sequence: u8| CommandOutcome::Sent {
                index,
                opcode,
                sequence,
            }
        };

        match command {
            LampCommand::Learn => self.learn_lamps(clock).map(CommandOutcome::Learned),
            LampCommand::Clear => {
                self.clear_lamps();
                Ok(CommandOutcome::Cleared)
            }
            LampCommand::AddLamp { address } => self
                .add_lamp(address)
                .map(|index| CommandOutcome::Stored { index }),
            LampCommand::SetColourRgb { index, colour } => self
                .set_lamp_colour_rgb(index, colour)
                .map(sent(index, Opcode::SetColour)),
            LampCommand::SetColourHsv { index, colour } => self
                .set_lamp_colour_hsv(index, colour)
                .map(sent(index, Opcode::SetColour)),
            LampCommand::TurnOnRgb { index, colour } => self
                .turn_lamp_on_rgb(index, colour)
                .map(sent(index, Opcode::On)),
            LampCommand::TurnOnHsv { index, colour } => self
                .turn_lamp_on_hsv(index, colour)
                .map(sent(index, Opcode::On)),
            LampCommand::TurnOff { index } => {
                self.turn_lamp_off(index).map(sent(index, Opcode::Off))
            }
        }
    }

    /// Status-Snapshot für die Verteilung an HTTP/MQTT
    pub fn status(
        &self,
        learning: bool,
        outcome: Result<CommandOutcome, LampError>,
    ) -> LampStatusMessage {
        LampStatusMessage {
            num_lamps: self.num_lamps(),
            max_lamps: self.max_num_lamps(),
            sequence: self.sequence,
            learning,
            outcome,
        }
    }
}
