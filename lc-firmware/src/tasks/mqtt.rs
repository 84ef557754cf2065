// MQTT Task - Published Lampen-Status an MQTT Broker
use core::fmt::Write;

use defmt::{Debug2Format, error, info, warn};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Timer, with_timeout};
use heapless::String;

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use crate::{LampStatusMessage, LampStatusSubscriber};
use crate::config::*;

/// MQTT Task - läuft parallel zu anderen Tasks
///
/// - Wartet auf Netzwerk-Verbindung
/// - Verbindet sich mit MQTT Broker
/// - Published nach jedem Lampen-Kommando die Anzahl gelernter Lampen
///   (retained) und das Ergebnis des Kommandos
/// - Automatisches Reconnect bei Fehlern
///
/// # Parameter
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `status_subscriber`: PubSub Subscriber für Lampen-Status-Broadcasts
#[embassy_executor::task]
pub async fn mqtt_task(
    stack: &'static Stack<'static>,
    mut status_subscriber: LampStatusSubscriber,
) {
    info!("MQTT: Task started, waiting for network...");
    stack.wait_config_up().await;
    info!("MQTT: Network ready");

    loop {
        match mqtt_connect_and_publish(stack, &mut status_subscriber).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Verbindet mit MQTT Broker und published Status-Updates
///
/// Bei jedem Fehler wird die Funktion beendet und der Haupt-Loop
/// startet automatisch einen Reconnect-Versuch.
async fn mqtt_connect_and_publish(
    stack: &'static Stack<'static>,
    status_subscriber: &mut LampStatusSubscriber,
) -> Result<(), MqttError> {
    info!("MQTT: Resolving '{}'...", MQTT_BROKER);
    let broker_ip = resolve_hostname(stack, MQTT_BROKER).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    let mut rx_buffer = [0u8; 4096];
    let mut tx_buffer = [0u8; 4096];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(10)));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.keep_alive = 30;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;

    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    client
        .connect_to_broker()
        .await
        .map_err(|_| MqttError::ProtocolError)?;
    info!("MQTT: Connected to broker");

    // Event-basiert: wartet blockierend auf den nächsten Status
    loop {
        let status = status_subscriber.next_message_pure().await;
        let lamps = format_lamp_count(&status)?;
        let event = status.outcome_name();

        client
            .send_message(
                MQTT_TOPIC_LAMPS,
                lamps.as_bytes(),
                QualityOfService::QoS0,
                true,
            )
            .await
            .map_err(|_| MqttError::PublishFailed)?;

        client
            .send_message(
                MQTT_TOPIC_EVENT,
                event.as_bytes(),
                QualityOfService::QoS0,
                false,
            )
            .await
            .map_err(|_| MqttError::PublishFailed)?;

        info!("MQTT: Published lamps={} event='{}'", status.num_lamps, event);
    }
}

/// Anzahl gelernter Lampen als Dezimal-Text
fn format_lamp_count(status: &LampStatusMessage) -> Result<String<4>, MqttError> {
    let mut text = String::new();
    write!(text, "{}", status.num_lamps).map_err(|_| MqttError::EncodingFailed)?;
    Ok(text)
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => {
            for addr in addrs {
                if let IpAddress::Ipv4(ipv4) = addr {
                    return Ok(ipv4);
                }
            }
            Err(MqttError::DnsResolutionFailed)
        }
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// MQTT Fehler-Typen
///
/// Alle möglichen Fehler die während MQTT-Operationen auftreten können.
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    PublishFailed,
    EncodingFailed,
}

impl defmt::Format for MqttError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MqttError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            MqttError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            MqttError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            MqttError::ProtocolError => defmt::write!(fmt, "Protocol error"),
            MqttError::PublishFailed => defmt::write!(fmt, "Publish failed"),
            MqttError::EncodingFailed => defmt::write!(fmt, "Payload encoding failed"),
        }
    }
}
