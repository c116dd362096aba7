//! Error types for the relay
//!
//! Defines application-level errors, per-connection transport errors
//! and mailbox delivery errors. Uses thiserror for ergonomic error definitions.

use thiserror::Error;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Error as WsError;

/// Application-level errors
///
/// Raised while accepting a connection or talking to the hub.
#[derive(Debug, Error)]
pub enum AppError {
    /// WebSocket protocol error (fatal)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// IO error (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send error (fatal - hub is gone)
    #[error("Channel send error")]
    ChannelSend,

    /// Request path does not name a valid room and nickname
    #[error("Wrong path: `{0}`")]
    WrongPath(String),
}

/// Errors that end one side of a client connection
///
/// Local to a single client: they tear that client down and nothing else.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Peer sent a close frame
    #[error("Connection closed by peer")]
    Closed(Option<CloseFrame<'static>>),

    /// Read or write failure, protocol violation or oversized message
    #[error("Transport error: {0}")]
    Transport(#[from] WsError),

    /// No pong arrived before the read deadline
    #[error("Read deadline expired")]
    ReadTimeout,

    /// A write did not complete within the write deadline
    #[error("Write deadline expired")]
    WriteTimeout,
}

impl ConnectionError {
    /// Check if this error is worth reporting
    ///
    /// Normal, going-away and abnormal closures are routine. So are read
    /// timeouts and plain socket errors. Anything else (odd close codes,
    /// protocol or capacity violations) is unexpected.
    pub fn is_unexpected(&self) -> bool {
        match self {
            ConnectionError::Closed(Some(frame)) => !matches!(
                frame.code,
                CloseCode::Normal | CloseCode::Away | CloseCode::Abnormal
            ),
            ConnectionError::Closed(None) => false,
            ConnectionError::Transport(
                WsError::ConnectionClosed
                | WsError::AlreadyClosed
                | WsError::Io(_)
                | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake),
            ) => false,
            ConnectionError::Transport(_) => true,
            ConnectionError::ReadTimeout | ConnectionError::WriteTimeout => false,
        }
    }
}

/// Mailbox delivery errors
///
/// Occurs when the hub cannot push a payload into a client's mailbox.
#[derive(Debug, Error)]
pub enum SendError {
    /// The mailbox is at capacity (slow consumer)
    #[error("Mailbox full")]
    MailboxFull,

    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}
