//! Client struct definition
//!
//! The hub's handle on a connected client: where it sits and how to reach it.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_tungstenite::tungstenite::Message;

use crate::error::SendError;
use crate::message::Envelope;
use crate::types::{ClientId, Nickname, RoomName};

/// Connected client information
///
/// Holds the only sender of the client's mailbox. Dropping the handle
/// closes the mailbox, which makes the writer pump shut the connection.
#[derive(Debug)]
pub struct Client {
    /// Unique identifier for this client
    pub id: ClientId,
    /// Room taken from the connection path
    pub room: RoomName,
    /// Nickname taken from the connection path (empty for listeners)
    pub nick: Nickname,
    /// Hub → writer pump mailbox
    mailbox: mpsc::Sender<Message>,
}

impl Client {
    /// Create a new client with the given route and mailbox sender
    pub fn new(
        id: ClientId,
        room: RoomName,
        nick: Nickname,
        mailbox: mpsc::Sender<Message>,
    ) -> Self {
        Self {
            id,
            room,
            nick,
            mailbox,
        }
    }

    /// Check if an envelope should be delivered to this client
    ///
    /// Same room, and either the same nickname or this client is a listener.
    pub fn accepts(&self, envelope: &Envelope) -> bool {
        self.room == envelope.room && (self.nick == envelope.nick || self.nick.is_listener())
    }

    /// Push a payload into the mailbox without waiting
    pub fn try_deliver(&self, payload: Message) -> Result<(), SendError> {
        self.mailbox.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => SendError::MailboxFull,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }
}
