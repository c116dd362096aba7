//! WebSocket connection handler
//!
//! Accepts TCP connections, performs the WebSocket handshake while
//! validating the room/nickname path, registers the client with the Hub
//! and runs its reader and writer pumps.

use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tracing::{debug, error, info, warn};

use crate::client::Client;
use crate::config::RelayConfig;
use crate::connection::{ConnectionReader, ConnectionWriter};
use crate::error::AppError;
use crate::hub::{Hub, HubCommand};
use crate::pump::{read_pump, write_pump, Publisher};
use crate::route::Route;
use crate::types::ClientId;

/// Spawn the Hub and accept connections forever
///
/// Accept failures are logged and skipped; each connection gets its own task.
pub async fn serve(listener: TcpListener, config: RelayConfig) {
    let (cmd_tx, cmd_rx) = mpsc::channel(config.hub_capacity);
    tokio::spawn(Hub::new(cmd_rx).run());

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                debug!("New connection from {}", addr);
                let cmd_tx = cmd_tx.clone();

                tokio::spawn(async move {
                    match handle_connection(stream, cmd_tx, config).await {
                        Ok(()) => {}
                        Err(e @ AppError::WrongPath(_)) => warn!("Rejected {}: {}", addr, e),
                        Err(e) => error!("Connection handler error: {}", e),
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Handle a new TCP connection
///
/// Upgrades to WebSocket only if the request path names a valid room and
/// nickname, then runs the client until both pumps have stopped.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<HubCommand>,
    config: RelayConfig,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    // WebSocket handshake, path checked before the upgrade is accepted
    let mut route: Option<Result<Route, AppError>> = None;
    let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
        let parsed = Route::parse(req.uri().path());
        let outcome = match parsed {
            Ok(_) => Ok(resp),
            Err(_) => Err(not_found()),
        };
        route = Some(parsed);
        outcome
    };
    let handshake = tokio_tungstenite::accept_hdr_async_with_config(
        stream,
        callback,
        Some(config.websocket_config()),
    )
    .await;

    let (ws_stream, route) = match (handshake, route) {
        (Ok(ws), Some(Ok(route))) => (ws, route),
        (_, Some(Err(e))) => return Err(e),
        (Err(e), _) => return Err(e.into()),
        // Only reachable if the handshake never consulted the path
        (Ok(_), None) => return Err(AppError::WrongPath(String::new())),
    };

    let client_id = ClientId::new();
    info!(
        "Client {} connected from {} to room '{}' with nick '{}'",
        client_id, peer_addr, route.room, route.nick
    );

    // Mailbox: Hub -> writer pump
    let (mailbox_tx, mailbox_rx) = mpsc::channel(config.mailbox_capacity);
    let client = Client::new(client_id, route.room.clone(), route.nick.clone(), mailbox_tx);

    // Register with Hub
    if cmd_tx.send(HubCommand::Register(client)).await.is_err() {
        error!("Failed to register client {} - hub closed", client_id);
        return Err(AppError::ChannelSend);
    }

    let (ws_sender, ws_receiver) = ws_stream.split();
    let (writer_done_tx, writer_done_rx) = oneshot::channel();
    let (reader_done_tx, reader_done_rx) = oneshot::channel();

    let write_task = tokio::spawn(write_pump(
        ConnectionWriter::new(ws_sender, config.write_wait),
        mailbox_rx,
        config.ping_period(),
        writer_done_tx,
        reader_done_rx,
    ));
    let read_task = tokio::spawn(read_pump(
        ConnectionReader::new(ws_receiver, config.pong_wait),
        Publisher {
            id: client_id,
            room: route.room,
            nick: route.nick,
        },
        cmd_tx,
        reader_done_tx,
        writer_done_rx,
    ));

    let (read_result, write_result) = tokio::join!(read_task, write_task);
    if let Err(e) = read_result {
        error!("Read task for {} failed: {}", client_id, e);
    }
    if let Err(e) = write_result {
        error!("Write task for {} failed: {}", client_id, e);
    }

    info!("Client {} disconnected", client_id);

    Ok(())
}

/// Handshake rejection for paths that do not match `/<room>/<nick>`
fn not_found() -> ErrorResponse {
    let mut response = ErrorResponse::new(None);
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
