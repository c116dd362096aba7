//! Per-client reader and writer pumps
//!
//! Each client runs two tasks. The reader pump feeds inbound frames to the
//! hub; the writer pump drains the client's mailbox onto the connection and
//! keeps the peer alive with pings. They are coupled only by the mailbox
//! (through the hub) and by a pair of oneshots, one per direction, that
//! fire when the owning pump stops.

use std::time::Duration;

use futures_util::{Sink, Stream};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, warn};

use crate::connection::{ConnectionReader, ConnectionWriter};
use crate::hub::HubCommand;
use crate::message::Envelope;
use crate::types::{ClientId, Nickname, RoomName};

/// Identity the reader pump stamps on everything it publishes
#[derive(Debug, Clone)]
pub struct Publisher {
    pub id: ClientId,
    pub room: RoomName,
    pub nick: Nickname,
}

/// Read frames until the connection fails, then unregister
///
/// Listeners (empty nickname) never publish: their frames are dropped.
/// Also stops once `writer_done` resolves, i.e. the writer pump has exited.
/// Dropping `done` on exit makes the writer pump close the connection.
pub async fn read_pump<S>(
    mut reader: ConnectionReader<S>,
    publisher: Publisher,
    hub: mpsc::Sender<HubCommand>,
    done: oneshot::Sender<()>,
    mut writer_done: oneshot::Receiver<()>,
) where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    let client_id = publisher.id;

    loop {
        let result = tokio::select! {
            _ = &mut writer_done => {
                debug!("Writer stopped, ending read pump for {}", client_id);
                break;
            }
            result = reader.recv() => result,
        };

        match result {
            Ok(payload) => {
                if publisher.nick.is_listener() {
                    continue;
                }
                let envelope =
                    Envelope::new(publisher.room.clone(), publisher.nick.clone(), payload);
                if hub.send(HubCommand::Broadcast(envelope)).await.is_err() {
                    debug!("Hub closed, ending read pump for {}", client_id);
                    break;
                }
            }
            Err(e) => {
                if e.is_unexpected() {
                    warn!("Client {} read error: {}", client_id, e);
                } else {
                    debug!("Client {} read ended: {}", client_id, e);
                }
                break;
            }
        }
    }

    // Close the connection first; the hub may take a while to get to us
    drop(done);
    let _ = hub.send(HubCommand::Unregister(client_id)).await;
    debug!("Read pump ended for {}", client_id);
}

/// Drain the mailbox onto the connection, pinging every `ping_period`
///
/// Exits on a write error, when the hub closes the mailbox, or as soon as
/// the reader pump stops (anything still queued is dropped), then closes
/// the connection. Dropping `_done` on exit wakes the reader pump.
pub async fn write_pump<K>(
    mut writer: ConnectionWriter<K>,
    mut mailbox: mpsc::Receiver<Message>,
    ping_period: Duration,
    _done: oneshot::Sender<()>,
    mut reader_done: oneshot::Receiver<()>,
) where
    K: Sink<Message, Error = WsError> + Unpin,
{
    let mut ticker = time::interval_at(Instant::now() + ping_period, ping_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = &mut reader_done => {
                debug!("Reader stopped");
                break;
            }
            item = mailbox.recv() => {
                let Some(payload) = item else {
                    debug!("Mailbox closed");
                    break;
                };
                if let Err(e) = writer.send(payload).await {
                    debug!("Write failed: {}", e);
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Err(e) = writer.ping().await {
                    debug!("Ping failed: {}", e);
                    break;
                }
            }
        }
    }

    writer.close().await;
    debug!("Write pump ended");
}
