//! Broadcast envelope
//!
//! Payloads are opaque: the relay forwards text and binary frames verbatim
//! and never looks inside them.

use tokio_tungstenite::tungstenite::Message;

use crate::types::{Nickname, RoomName};

/// A message on its way from one client's reader pump to the hub
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Room the sender belongs to
    pub room: RoomName,
    /// Sender nickname (never empty)
    pub nick: Nickname,
    /// Data frame as received
    pub payload: Message,
}

impl Envelope {
    pub fn new(room: RoomName, nick: Nickname, payload: Message) -> Self {
        Self {
            room,
            nick,
            payload,
        }
    }
}
