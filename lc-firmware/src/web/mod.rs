// Web-Modul für HTTP Server und WebSocket

pub mod protocol;

// HTML-Datei zur Compile-Zeit einbinden
pub const INDEX_HTML: &str = include_str!("index.html");
