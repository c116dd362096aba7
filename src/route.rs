//! Connection path parsing
//!
//! A client picks its room and nickname through the request path:
//! `/<room>/<nick>`, where the nickname may be empty.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;
use crate::types::{Nickname, RoomName};

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([A-Za-z0-9_]{3,64})/([A-Za-z0-9_]{0,16})$").expect("path pattern is valid")
});

/// Room and nickname requested by a connecting client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub room: RoomName,
    pub nick: Nickname,
}

impl Route {
    /// Parse a request path into a route
    ///
    /// Returns `AppError::WrongPath` when the path does not match
    /// `/<room>/<nick>` exactly.
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let captures = PATH_PATTERN
            .captures(path)
            .ok_or_else(|| AppError::WrongPath(path.to_string()))?;

        Ok(Self {
            room: RoomName::from(&captures[1]),
            nick: Nickname::from(&captures[2]),
        })
    }
}
