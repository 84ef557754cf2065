// Hardware Abstraction Layer (HAL) Module
//
// Konkrete Implementierungen der Traits aus lc-core für den ESP32-C6.

pub mod cc2500;
pub mod clock;

pub use cc2500::{Cc2500Pins, Cc2500Spi, EspCc2500};
pub use clock::EmbassyClock;
