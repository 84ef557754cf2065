// Lampen Task - Steuert LivingColors Lampen über den CC2500
use defmt::{Debug2Format, debug, error, info, warn};
use embassy_time::{Duration, Timer};
use lc_core::{Cc2500Transport, Clock, LEARN_DURATION_MS, LearnStep};

use crate::config::LEARN_POLL_INTERVAL_MS;
use crate::hal::{Cc2500Pins, EmbassyClock, EspCc2500};
use crate::{
    CommandOutcome, LampCommand, LampCommandReceiver, LampError, LampStatusPublisher, LivingColors,
};

/// Lampen-Logik ohne Hardware-Abhängigkeit
///
/// - Initialisiert den Funk-Chip
/// - Wartet auf Kommandos vom WebSocket
/// - Führt den Lern-Modus kooperativ aus (andere Tasks laufen weiter)
/// - Verteilt nach jedem Kommando einen Status an MQTT und HTTP
///
/// Kommandos, die während eines Lern-Durchlaufs eintreffen, bleiben im
/// Channel und werden danach abgearbeitet.
pub async fn lamp_control_logic<T: Cc2500Transport, C: Clock>(
    mut lamps: LivingColors<T>,
    clock: C,
    status_publisher: LampStatusPublisher,
    command_receiver: LampCommandReceiver,
) {
    match lamps.init() {
        Ok(()) => info!("LAMP: CC2500 initialized"),
        // Kein Abbruch: jedes Kommando meldet den Fehler erneut
        Err(e) => error!("LAMP: CC2500 init failed: {}", e),
    }

    loop {
        let command = command_receiver.receive().await;
        info!("LAMP: Command received: {}", command);

        let outcome = match command {
            LampCommand::Learn => learn(&mut lamps, &clock, &status_publisher).await,
            other => lamps.execute(other, &clock),
        };

        match outcome {
            Ok(result) => info!("LAMP: {}", result),
            Err(e) => warn!("LAMP: Command failed: {}", e),
        }

        let status = lamps.status(false, outcome);
        status_publisher.publish_immediate(status);
        debug!(
            "LAMP: Published status ({} lamps, seq {})",
            status.num_lamps, status.sequence
        );
    }
}

/// Lern-Durchlauf mit Timer zwischen den FIFO-Abfragen
async fn learn<T: Cc2500Transport, C: Clock>(
    lamps: &mut LivingColors<T>,
    clock: &C,
    status_publisher: &LampStatusPublisher,
) -> Result<CommandOutcome, LampError> {
    let mut session = lamps.begin_learning(clock.now_ms())?;
    status_publisher.publish_immediate(lamps.status(true, Ok(CommandOutcome::Listening)));
    info!(
        "LAMP: Learning for {} ms, press buttons on the remote now",
        LEARN_DURATION_MS
    );

    loop {
        match lamps.poll_learning(&mut session, clock.now_ms())? {
            LearnStep::Finished(report) => return Ok(CommandOutcome::Learned(report)),
            LearnStep::Captured {
                index,
                new,
                sequence,
            } => {
                info!(
                    "LAMP: Captured lamp {} (new: {}, seq {})",
                    index, new, sequence
                );
                let captured = CommandOutcome::Captured { index, new };
                status_publisher.publish_immediate(lamps.status(true, Ok(captured)));
            }
            LearnStep::Discarded => warn!("LAMP: Address book full, remote frame discarded"),
            LearnStep::Ignored => debug!("LAMP: Packet ignored"),
            LearnStep::Waiting => {
                Timer::after(Duration::from_millis(LEARN_POLL_INTERVAL_MS)).await;
            }
        }
    }
}

/// Lampen Task - Embassy Task für parallele Ausführung
///
/// Initialisiert SPI2 mit den CC2500-Pins und ruft dann
/// `lamp_control_logic()` auf.
#[embassy_executor::task]
pub async fn lamp_task(
    spi: esp_hal::peripherals::SPI2<'static>,
    pins: Cc2500Pins,
    status_publisher: LampStatusPublisher,
    command_receiver: LampCommandReceiver,
) {
    let transport = match EspCc2500::from_peripherals(spi, pins) {
        Ok(transport) => transport,
        Err(e) => {
            error!("LAMP: SPI configuration failed: {}", Debug2Format(&e));
            return;
        }
    };

    lamp_control_logic(
        LivingColors::new(transport),
        EmbassyClock,
        status_publisher,
        command_receiver,
    )
    .await;
}
