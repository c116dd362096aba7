//! Room-based WebSocket Relay Library
//!
//! A WebSocket relay built with tokio-tungstenite using the Actor pattern
//! for membership state.
//!
//! # Features
//! - Room and nickname chosen by the connection path: `/<room>/<nick>`
//! - Messages fanned out to same-room clients with the same nickname
//! - Listeners (empty nickname) receive all traffic in their room
//! - Ping/pong keepalive with read and write deadlines
//! - Slow consumers evicted instead of stalling delivery
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `Hub` is the central actor owning the membership set
//! - Each connection runs a reader pump and a writer pump task
//! - No locks needed - all membership changes go through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use room_relay::{serve, RelayConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("0.0.0.0:9000").await.unwrap();
//!     serve(listener, RelayConfig::default()).await;
//! }
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod handler;
pub mod hub;
pub mod message;
pub mod pump;
pub mod route;
pub mod types;

// Re-export main types for convenience
pub use client::Client;
pub use config::RelayConfig;
pub use connection::{ConnectionReader, ConnectionWriter};
pub use error::{AppError, ConnectionError, SendError};
pub use handler::{handle_connection, serve};
pub use hub::{Hub, HubCommand};
pub use message::Envelope;
pub use route::Route;
pub use types::{ClientId, Nickname, RoomName};
