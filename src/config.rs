//! Relay configuration
//!
//! Timings and limits for connections and the hub. Defaults match the
//! production relay; tests shrink the liveness window with `with_pong_wait`.

use std::time::Duration;

use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

/// Default listen address
pub const DEFAULT_ADDR: &str = "0.0.0.0:9000";

/// Time allowed to read the next pong from the peer
pub const PONG_WAIT: Duration = Duration::from_secs(60);

/// Time allowed to write a frame to the peer
pub const WRITE_WAIT: Duration = Duration::from_secs(10);

/// Maximum inbound message size
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Per-client outbound queue size
pub const MAILBOX_CAPACITY: usize = 256;

/// Hub command channel buffer size
pub const HUB_CAPACITY: usize = 256;

/// Connection and hub settings
#[derive(Debug, Clone, Copy)]
pub struct RelayConfig {
    pub pong_wait: Duration,
    pub write_wait: Duration,
    pub max_message_size: usize,
    pub mailbox_capacity: usize,
    pub hub_capacity: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            pong_wait: PONG_WAIT,
            write_wait: WRITE_WAIT,
            max_message_size: MAX_MESSAGE_SIZE,
            mailbox_capacity: MAILBOX_CAPACITY,
            hub_capacity: HUB_CAPACITY,
        }
    }
}

impl RelayConfig {
    /// Ping period, kept below `pong_wait` so every window sees a ping
    pub fn ping_period(&self) -> Duration {
        self.pong_wait * 9 / 10
    }

    /// WebSocket settings applied at handshake
    pub fn websocket_config(&self) -> WebSocketConfig {
        let mut config = WebSocketConfig::default();
        config.max_message_size = Some(self.max_message_size);
        config.max_frame_size = Some(self.max_message_size);
        config
    }

    pub fn with_pong_wait(mut self, pong_wait: Duration) -> Self {
        self.pong_wait = pong_wait;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ping_period() {
        let config = RelayConfig::default();
        assert_eq!(config.ping_period(), Duration::from_secs(54));
        assert!(config.ping_period() < config.pong_wait);
    }

    #[test]
    fn test_ping_period_follows_pong_wait() {
        let config = RelayConfig::default().with_pong_wait(Duration::from_millis(100));
        assert_eq!(config.ping_period(), Duration::from_millis(90));
    }

    #[test]
    fn test_websocket_limits() {
        let ws = RelayConfig::default().websocket_config();
        assert_eq!(ws.max_message_size, Some(64 * 1024));
        assert_eq!(ws.max_frame_size, Some(64 * 1024));
    }
}
