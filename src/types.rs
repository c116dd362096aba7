//! Basic type definitions for the relay
//!
//! Provides newtype wrappers for type safety:
//! - `ClientId`: UUID-based unique client identifier
//! - `RoomName`: room key taken from the connection path
//! - `Nickname`: sender name, empty for listeners

use uuid::Uuid;

/// Unique client identifier (newtype pattern)
///
/// Wraps a UUID v4 for type-safe client identification.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Create a new random client ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name (3-64 characters of `[A-Za-z0-9_]`)
///
/// Rooms are never created explicitly: clients holding equal names share a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(pub String);

impl RoomName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl std::fmt::Display for RoomName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client nickname (0-16 characters of `[A-Za-z0-9_]`)
///
/// An empty nickname marks a listener: it receives every message in its
/// room and never publishes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Nickname(pub String);

impl Nickname {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the empty listener nickname
    pub fn is_listener(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Nickname {
    fn from(nick: &str) -> Self {
        Self(nick.to_string())
    }
}

impl std::fmt::Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_unique() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_empty_nickname_is_listener() {
        assert!(Nickname::default().is_listener());
        assert!(Nickname::from("").is_listener());
        assert!(!Nickname::from("alice").is_listener());
    }

    #[test]
    fn test_room_name_display() {
        let room = RoomName::from("team17");
        assert_eq!(room.to_string(), "team17");
        assert_eq!(room.as_str(), "team17");
    }
}
