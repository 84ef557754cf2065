// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// CC2500 Anschluss (SPI2)
// ============================================================================

/// SPI Taktfrequenz in kHz
/// CC2500 erlaubt bis 6.5 MHz für Burst-Zugriffe, 10 MHz für Einzelzugriffe
pub const CC2500_SPI_FREQUENCY_KHZ: u32 = 4000;

/// Maximale Wartezeit auf CHIP_RDYn in Mikrosekunden
/// Nach SRES braucht der Kristall-Oszillator bis zu ~150 µs
pub const CC2500_READY_TIMEOUT_US: u32 = 1000;

// ============================================================================
// Lampen-Task
// ============================================================================

/// Abfrage-Intervall für den RX-FIFO im Lern-Modus
/// Ein 17-Byte Paket braucht bei 250 kBaud ca. 0.6 ms, 2 ms ist kurz genug
/// um den FIFO (64 Bytes) nie überlaufen zu lassen
pub const LEARN_POLL_INTERVAL_MS: u64 = 2;

/// Kapazität des Kommando-Channels (Browser → Lampen-Task)
pub const LAMP_COMMAND_QUEUE_LEN: usize = 4;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port (unverschlüsselt, nicht über .env einstellbar)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Topic für die Anzahl gelernter Lampen
pub const MQTT_TOPIC_LAMPS: &str = env!(
    "MQTT_TOPIC_LAMPS",
    "MQTT Topic Lamps nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Topic für das Ergebnis des letzten Kommandos
/// (z.B. "colour", "learned", "invalid_index")
pub const MQTT_TOPIC_EVENT: &str = env!(
    "MQTT_TOPIC_EVENT",
    "MQTT Topic Event nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Reconnect Delay in Sekunden
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Buffer-Größe in Bytes
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// Anzahl paralleler HTTP-Server-Tasks
pub const HTTP_TASK_POOL_SIZE: usize = 4;

/// HTTP Buffer-Größe in Bytes
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// WebSocket Message Buffer-Größe in Bytes
pub const WEBSOCKET_BUFFER_SIZE: usize = 512;

/// JSON Serialisierungs-Buffer für WebSocket Status-Updates
pub const JSON_STATUS_BUFFER_SIZE: usize = 256;

/// JSON Serialisierungs-Buffer für WebSocket Error-Messages
pub const JSON_ERROR_BUFFER_SIZE: usize = 128;
