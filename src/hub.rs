//! Hub actor implementation
//!
//! The single owner of the membership set. Registration, unregistration and
//! broadcast routing all pass through one command channel and are handled
//! one at a time, so membership is never touched concurrently.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::Client;
use crate::error::SendError;
use crate::message::Envelope;
use crate::types::ClientId;

/// Commands sent from connection tasks to the Hub actor
#[derive(Debug)]
pub enum HubCommand {
    /// New client passed the handshake
    Register(Client),
    /// One of the client's pumps stopped
    Unregister(ClientId),
    /// Route a message to matching clients
    Broadcast(Envelope),
}

/// The Hub actor
///
/// Handlers never wait on a client, so one slow consumer cannot hold up
/// routing for anybody else.
pub struct Hub {
    /// Live clients: ClientId -> Client
    clients: HashMap<ClientId, Client>,
    /// Command receiver channel
    receiver: mpsc::Receiver<HubCommand>,
}

impl Hub {
    /// Create a new Hub with the given command receiver
    pub fn new(receiver: mpsc::Receiver<HubCommand>) -> Self {
        Self {
            clients: HashMap::new(),
            receiver,
        }
    }

    /// Run the Hub event loop
    ///
    /// Continuously receives and processes commands until all senders are dropped.
    pub async fn run(mut self) {
        info!("Hub started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("Hub shutting down");
    }

    /// Process a single command
    fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Register(client) => self.handle_register(client),
            HubCommand::Unregister(client_id) => self.handle_unregister(client_id),
            HubCommand::Broadcast(envelope) => self.handle_broadcast(envelope),
        }
    }

    fn handle_register(&mut self, client: Client) {
        info!(
            "+++client {} (room '{}', nick '{}')",
            client.id, client.room, client.nick
        );
        self.clients.insert(client.id, client);
        debug!("Total clients: {}", self.clients.len());
    }

    /// Dropping the removed handle closes its mailbox
    fn handle_unregister(&mut self, client_id: ClientId) {
        if self.clients.remove(&client_id).is_some() {
            info!("---client {}", client_id);
            debug!("Total clients: {}", self.clients.len());
        }
    }

    /// Deliver to every client in the sender's room whose nickname matches
    /// or is empty. Clients whose mailbox refuses the payload are evicted.
    fn handle_broadcast(&mut self, envelope: Envelope) {
        self.clients.retain(|client_id, client| {
            if !client.accepts(&envelope) {
                return true;
            }
            match client.try_deliver(envelope.payload.clone()) {
                Ok(()) => true,
                Err(SendError::MailboxFull) => {
                    warn!("Evicting slow client {}: mailbox full", client_id);
                    false
                }
                // Writer already gone, its unregistration is on the way
                Err(SendError::ChannelClosed) => {
                    debug!("Dropping client {}: mailbox closed", client_id);
                    false
                }
            }
        });
    }
}
