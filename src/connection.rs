//! WebSocket connection halves with liveness deadlines
//!
//! A connection is split into a reader (owned by the reader pump) and a
//! writer (owned by the writer pump). Both are generic over the futures
//! `Stream`/`Sink` traits so they work on any tungstenite transport.

use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::time::{self, Instant};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::debug;

use crate::error::ConnectionError;

/// Receiving half of a client connection
///
/// Tracks an inbound deadline that only pong frames push forward.
pub struct ConnectionReader<S> {
    stream: S,
    pong_wait: Duration,
    deadline: Instant,
}

impl<S> ConnectionReader<S>
where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    /// Wrap a stream; the first deadline is `pong_wait` from now
    pub fn new(stream: S, pong_wait: Duration) -> Self {
        Self {
            stream,
            pong_wait,
            deadline: Instant::now() + pong_wait,
        }
    }

    /// Receive the next data message (text or binary)
    ///
    /// Pongs refresh the deadline, pings are answered by tungstenite.
    /// Cancel safe.
    pub async fn recv(&mut self) -> Result<Message, ConnectionError> {
        loop {
            let next = time::timeout_at(self.deadline, self.stream.next())
                .await
                .map_err(|_| ConnectionError::ReadTimeout)?;

            match next {
                Some(Ok(msg @ (Message::Text(_) | Message::Binary(_)))) => return Ok(msg),
                Some(Ok(Message::Pong(_))) => {
                    self.deadline = Instant::now() + self.pong_wait;
                }
                Some(Ok(Message::Ping(_))) => {
                    debug!("Ping from peer");
                }
                Some(Ok(Message::Close(frame))) => return Err(ConnectionError::Closed(frame)),
                Some(Ok(Message::Frame(_))) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Err(WsError::ConnectionClosed.into()),
            }
        }
    }
}

/// Sending half of a client connection
///
/// Every write gets its own `write_wait` deadline.
pub struct ConnectionWriter<K> {
    sink: K,
    write_wait: Duration,
}

impl<K> ConnectionWriter<K>
where
    K: Sink<Message, Error = WsError> + Unpin,
{
    pub fn new(sink: K, write_wait: Duration) -> Self {
        Self { sink, write_wait }
    }

    /// Send one frame under the write deadline
    pub async fn send(&mut self, msg: Message) -> Result<(), ConnectionError> {
        time::timeout(self.write_wait, self.sink.send(msg))
            .await
            .map_err(|_| ConnectionError::WriteTimeout)??;
        Ok(())
    }

    /// Send an empty ping frame
    pub async fn ping(&mut self) -> Result<(), ConnectionError> {
        self.send(Message::Ping(Default::default())).await
    }

    /// Send a close frame and flush
    ///
    /// Safe to call more than once; failures are ignored since the
    /// connection is going away anyway.
    pub async fn close(&mut self) {
        match time::timeout(self.write_wait, self.sink.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("Close failed: {}", e),
            Err(_) => debug!("Close timed out"),
        }
    }
}
