//! Room Relay - Entry Point
//!
//! Starts the TCP listener and Hub actor, accepting connections.

use std::env;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use room_relay::config::DEFAULT_ADDR;
use room_relay::{serve, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=room_relay=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("room_relay=info")),
        )
        .init();

    // Get bind address from command line or use default
    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    info!("Launching relay server");

    // Start TCP listener (failure here is fatal)
    let listener = TcpListener::bind(&addr).await?;
    info!("WebSocket Relay listening on {}", listener.local_addr()?);

    tokio::select! {
        _ = serve(listener, RelayConfig::default()) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for ctrl-c: {}", e);
            }
            info!("Shutting down");
        }
    }

    Ok(())
}
