// Zeitbasis für den Lern-Modus
use embassy_time::Instant;
use lc_core::Clock;

/// Monotone Millisekunden seit Boot (embassy-time)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
