// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (Lampen → MQTT, HTTP ↔ Lampen).

pub mod http;
pub mod lamp;
pub mod mqtt;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use http::http_server_task;
pub use lamp::lamp_task;
pub use mqtt::mqtt_task;
pub use wifi::{connection_task, dhcp_task, net_task};
