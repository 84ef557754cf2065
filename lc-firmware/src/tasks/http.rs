// HTTP Server Task - Serviert die Steuer-Seite und den WebSocket
use core::future::pending;
use defmt::{info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_time::Duration;
use picoserve::{io::embedded_io_async, response::IntoResponse, response::ws, routing::get};
use serde::Serialize;

use crate::config::*;
use crate::web::{
    INDEX_HTML,
    protocol::{WsClientMessage, WsServerMessage},
};
use crate::{LampCommandSender, LampStatusChannel, LampStatusMessage, LampStatusSubscriber};

/// Response-Enum für WebSocket-Endpoint
/// Ermöglicht Rückgabe von entweder WebSocket-Upgrade oder HTTP-Fehler
enum WebSocketResponse {
    Upgrade(
        ws::UpgradedWebSocket<ws::UnspecifiedProtocol, ws::CallbackNotUsingState<WebSocketHandler>>,
    ),
    ServiceUnavailable,
}

impl IntoResponse for WebSocketResponse {
    async fn write_to<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        self,
        connection: picoserve::response::Connection<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        match self {
            WebSocketResponse::Upgrade(ws) => ws.write_to(connection, response_writer).await,
            WebSocketResponse::ServiceUnavailable => {
                picoserve::response::Response::new(
                    picoserve::response::StatusCode::new(503),
                    "Service Unavailable: Too many WebSocket connections",
                )
                .with_header("Retry-After", "5")
                .write_to(connection, response_writer)
                .await
            }
        }
    }
}

/// HTTP Server Task - läuft parallel zu anderen Tasks
///
/// - Serviert index.html auf GET /
/// - WebSocket-Endpoint auf /ws: Kommandos vom Browser, Status zum Browser
///
/// **Task Pool:** Diese Task wird mehrfach gespawnt, damit HTML und
/// mehrere WebSockets gleichzeitig bedient werden können.
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `status_channel`: PubSub Channel für Lampen-Status (ein Subscriber pro WebSocket)
/// - `command_sender`: Channel Sender für Lampen-Kommandos
// pool_size muss mit config::HTTP_TASK_POOL_SIZE übereinstimmen
#[embassy_executor::task(pool_size = 4)]
pub async fn http_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    status_channel: &'static LampStatusChannel,
    command_sender: LampCommandSender,
) {
    info!("HTTP: Server task {} starting on port 80...", task_id);

    let app = picoserve::Router::new().route("/", get(serve_html)).route(
        "/ws",
        get(
            |upgrade: picoserve::response::WebSocketUpgrade| async move {
                info!("HTTP: WebSocket upgrade requested");

                // Keine freien Subscriber-Slots: HTTP 503 statt Panic
                match status_channel.subscriber() {
                    Ok(status_subscriber) => {
                        let handler = WebSocketHandler {
                            command_sender,
                            status_subscriber,
                        };
                        WebSocketResponse::Upgrade(upgrade.on_upgrade(handler))
                    }
                    Err(_) => {
                        warn!("HTTP: No subscriber slots available, sending HTTP 503");
                        WebSocketResponse::ServiceUnavailable
                    }
                }
            },
        ),
    );

    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    let server = picoserve::Server::new(&app, &config, &mut http_buffer);
    let _ = server
        .listen_and_serve(task_id, *stack, 80, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

/// Serviert die Steuer-Seite
async fn serve_html() -> impl IntoResponse {
    picoserve::response::Response::new(picoserve::response::StatusCode::OK, INDEX_HTML)
        .with_header("Content-Type", "text/html; charset=utf-8")
}

/// WebSocket-Handler State
struct WebSocketHandler {
    command_sender: LampCommandSender,
    status_subscriber: LampStatusSubscriber,
}

impl ws::WebSocketCallback for WebSocketHandler {
    async fn run<R: embedded_io_async::Read, W: embedded_io_async::Write<Error = R::Error>>(
        mut self,
        mut rx: ws::SocketRx<R>,
        mut tx: ws::SocketTx<W>,
    ) -> Result<(), W::Error> {
        info!("HTTP: WebSocket connection established");

        let mut buffer = [0u8; WEBSOCKET_BUFFER_SIZE];

        if let Some(status) = self.status_subscriber.try_next_message_pure() {
            Self::send_status_update(&mut tx, &status).await?;
        }

        let close_reason = loop {
            // Gleichzeitig auf Browser-Nachrichten und Status-Broadcasts warten
            match select(
                rx.next_message(&mut buffer, pending()),
                self.status_subscriber.next_message_pure(),
            )
            .await
            {
                Either::First(ws_result) => match ws_result?.ignore_never_b() {
                    Ok(ws::Message::Text(data)) => {
                        info!("HTTP: Received text message: {} bytes", data.len());
                        self.handle_text(&mut tx, data).await?;
                    }
                    Ok(ws::Message::Binary(data)) => {
                        info!("HTTP: Received binary message: {} bytes (ignored)", data.len());
                    }
                    Ok(ws::Message::Ping(data)) => tx.send_pong(data).await?,
                    Ok(ws::Message::Pong(_)) => {}
                    Ok(ws::Message::Close(_reason)) => {
                        info!("HTTP: WebSocket close received");
                        break None;
                    }
                    Err(error) => {
                        warn!("HTTP: WebSocket error");
                        break Some((error.code(), "WebSocket Error"));
                    }
                },
                Either::Second(status) => {
                    Self::send_status_update(&mut tx, &status).await?;
                }
            }
        };

        info!("HTTP: WebSocket connection closed");
        tx.close(close_reason).await
    }
}

impl WebSocketHandler {
    /// Parst ein JSON-Kommando und reicht es an den Lampen-Task weiter
    ///
    /// Der Browser bekommt das Ergebnis über den Status-Broadcast, nicht als
    /// direkte Antwort. Nur ungültige Nachrichten werden direkt beantwortet.
    async fn handle_text<W: embedded_io_async::Write>(
        &self,
        tx: &mut ws::SocketTx<W>,
        data: &str,
    ) -> Result<(), W::Error> {
        let message = match serde_json_core::from_str::<WsClientMessage>(data) {
            Ok((message, _)) => message,
            Err(_) => {
                warn!("HTTP: JSON parse error");
                return Self::send_error(tx, "JSON parse error").await;
            }
        };

        match message.to_command() {
            Ok(command) => {
                info!("HTTP: Sending command to lamp task: {}", command);
                self.command_sender.send(command).await;
                Ok(())
            }
            Err(e) => {
                warn!("HTTP: Rejected request: {}", e.as_str());
                Self::send_error(tx, e.as_str()).await
            }
        }
    }

    async fn send_status_update<W: embedded_io_async::Write>(
        tx: &mut ws::SocketTx<W>,
        status: &LampStatusMessage,
    ) -> Result<(), W::Error> {
        let mut json_buffer = [0u8; JSON_STATUS_BUFFER_SIZE];
        Self::send_json(tx, &WsServerMessage::from(status), &mut json_buffer).await
    }

    async fn send_error<W: embedded_io_async::Write>(
        tx: &mut ws::SocketTx<W>,
        message: &'static str,
    ) -> Result<(), W::Error> {
        let mut json_buffer = [0u8; JSON_ERROR_BUFFER_SIZE];
        Self::send_json(tx, &WsServerMessage::Error { message }, &mut json_buffer).await
    }

    /// Serialisiert nach JSON und sendet als Text-Frame
    async fn send_json<W: embedded_io_async::Write>(
        tx: &mut ws::SocketTx<W>,
        message: &impl Serialize,
        json_buffer: &mut [u8],
    ) -> Result<(), W::Error> {
        let Ok(n) = serde_json_core::to_slice(message, json_buffer) else {
            warn!("HTTP: JSON buffer too small");
            return Ok(());
        };
        match core::str::from_utf8(&json_buffer[..n]) {
            Ok(json) => tx.send_text(json).await,
            Err(_) => Ok(()),
        }
    }
}
