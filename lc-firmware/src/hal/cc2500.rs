// CC2500 SPI Transport
//
// Implementiert den `Cc2500Transport` Trait aus lc-core über embedded-hal 1.0:
// SPI-Bus, Chip-Select und den GDO2-Pin (als CHIP_RDYn konfiguriert).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;
use lc_core::registers::{LIVINGCOLORS_CONFIG, PA_POWER_MAX, PATABLE, SRES};
use lc_core::{Cc2500Transport, TransportError};

/// CC2500 an einem exklusiven SPI-Bus
///
/// Chip-Select wird selbst gesteuert, weil der Chip nach dem Anwählen erst
/// CHIP_RDYn (low) melden muss, bevor das Header-Byte gesendet werden darf.
pub struct Cc2500Spi<SPI, CS, RDY, D> {
    spi: SPI,
    cs: CS,
    ready: RDY,
    delay: D,
    ready_timeout_us: u32,
}

impl<SPI, CS, RDY, D> Cc2500Spi<SPI, CS, RDY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RDY: InputPin,
    D: DelayNs,
{
    /// Erstellt den Transport
    ///
    /// `cs` sollte bereits high (abgewählt) sein.
    pub fn new(spi: SPI, cs: CS, ready: RDY, delay: D, ready_timeout_us: u32) -> Self {
        Self {
            spi,
            cs,
            ready,
            delay,
            ready_timeout_us,
        }
    }

    /// Wartet begrenzt darauf, dass der Chip CHIP_RDYn auf low zieht
    fn wait_ready(&mut self) -> Result<(), TransportError> {
        for _ in 0..self.ready_timeout_us {
            if self.ready.is_low().map_err(|_| TransportError::Bus)? {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(TransportError::Timeout)
    }

    /// Wählt den Chip an, führt `op` aus und wählt ihn in jedem Fall wieder ab
    fn transaction<R>(
        &mut self,
        op: impl FnOnce(&mut SPI) -> Result<R, SPI::Error>,
    ) -> Result<R, TransportError> {
        self.cs.set_low().map_err(|_| TransportError::Bus)?;

        let result = match self.wait_ready() {
            Ok(()) => op(&mut self.spi)
                .and_then(|value| self.spi.flush().map(|()| value))
                .map_err(|_| TransportError::Bus),
            Err(e) => Err(e),
        };

        let released = self.cs.set_high().map_err(|_| TransportError::Bus);
        let value = result?;
        released?;
        Ok(value)
    }

    /// Gibt die Peripherie wieder frei
    pub fn release(self) -> (SPI, CS, RDY, D) {
        (self.spi, self.cs, self.ready, self.delay)
    }
}

impl<SPI, CS, RDY, D> Cc2500Transport for Cc2500Spi<SPI, CS, RDY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RDY: InputPin,
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), TransportError> {
        for &(register, value) in LIVINGCOLORS_CONFIG {
            self.send_command(register, value)?;
        }
        self.send_command(PATABLE, PA_POWER_MAX)?;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        // Manueller Power-On-Reset: CSn kurz low, dann > 40 µs high
        self.cs.set_low().map_err(|_| TransportError::Bus)?;
        self.delay.delay_us(1);
        self.cs.set_high().map_err(|_| TransportError::Bus)?;
        self.delay.delay_us(41);

        self.send_strobe_command(SRES)?;
        // Nach SRES erst weiter, wenn der Oszillator wieder läuft
        self.transaction(|_| Ok(()))
    }

    fn send_byte(&mut self, data: u8) -> Result<u8, TransportError> {
        self.transaction(|spi| {
            let mut buffer = [data];
            spi.transfer_in_place(&mut buffer)?;
            Ok(buffer[0])
        })
    }

    fn send_command(&mut self, command: u8, data: u8) -> Result<u8, TransportError> {
        self.transaction(|spi| {
            let mut buffer = [command, data];
            spi.transfer_in_place(&mut buffer)?;
            Ok(buffer[1])
        })
    }

    fn send_burst_command(
        &mut self,
        command: u8,
        buffer: &mut [u8],
    ) -> Result<u8, TransportError> {
        self.transaction(|spi| {
            let mut header = [command];
            spi.transfer_in_place(&mut header)?;
            spi.transfer_in_place(buffer)?;
            Ok(buffer.last().copied().unwrap_or(header[0]))
        })
    }
}

// ============================================================================
// ESP32-C6 Hardware
// ============================================================================

mod esp {
    use esp_hal::Blocking;
    use esp_hal::delay::Delay;
    use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
    use esp_hal::peripherals::{GPIO2, GPIO3, GPIO6, GPIO7, GPIO10, SPI2};
    use esp_hal::spi::Mode;
    use esp_hal::spi::master::{Config, ConfigError, Spi};
    use esp_hal::time::Rate;

    use super::Cc2500Spi;
    use crate::config::{CC2500_READY_TIMEOUT_US, CC2500_SPI_FREQUENCY_KHZ};

    /// CC2500 an SPI2 des ESP32-C6
    pub type EspCc2500 = Cc2500Spi<Spi<'static, Blocking>, Output<'static>, Input<'static>, Delay>;

    /// GPIO-Zuordnung für den CC2500
    ///
    /// | CC2500 | ESP32-C6 |
    /// |--------|----------|
    /// | SCLK   | GPIO6    |
    /// | SI     | GPIO7    |
    /// | SO     | GPIO2    |
    /// | CSn    | GPIO10   |
    /// | GDO2   | GPIO3 (CHIP_RDYn) |
    pub struct Cc2500Pins {
        pub sclk: GPIO6<'static>,
        pub mosi: GPIO7<'static>,
        pub miso: GPIO2<'static>,
        pub cs: GPIO10<'static>,
        pub gdo2: GPIO3<'static>,
    }

    impl EspCc2500 {
        /// Initialisiert SPI2 (Mode 0) und die GPIOs für den CC2500
        pub fn from_peripherals(spi: SPI2<'static>, pins: Cc2500Pins) -> Result<Self, ConfigError> {
            let config = Config::default()
                .with_frequency(Rate::from_khz(CC2500_SPI_FREQUENCY_KHZ))
                .with_mode(Mode::_0);

            let spi = Spi::new(spi, config)?
                .with_sck(pins.sclk)
                .with_mosi(pins.mosi)
                .with_miso(pins.miso);

            // CSn ist low-aktiv, startet abgewählt
            let cs = Output::new(pins.cs, Level::High, OutputConfig::default());
            let ready = Input::new(pins.gdo2, InputConfig::default().with_pull(Pull::None));

            Ok(Cc2500Spi::new(
                spi,
                cs,
                ready,
                Delay::new(),
                CC2500_READY_TIMEOUT_US,
            ))
        }
    }
}

pub use esp::{Cc2500Pins, EspCc2500};
