//! Room identifiers (`shop_{id}` / `user_{id}`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Broadcast group scoped to one shop or one user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RoomId {
    Shop(i64),
    User(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid room id: {0}")]
pub struct InvalidRoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomId::Shop(id) => write!(f, "shop_{id}"),
            RoomId::User(id) => write!(f, "user_{id}"),
        }
    }
}

impl FromStr for RoomId {
    type Err = InvalidRoomId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRoomId(s.to_string());
        let (kind, id) = s.split_once('_').ok_or_else(invalid)?;
        let id: i64 = id.parse().map_err(|_| invalid())?;
        match kind {
            "shop" => Ok(RoomId::Shop(id)),
            "user" => Ok(RoomId::User(id)),
            _ => Err(invalid()),
        }
    }
}

impl From<RoomId> for String {
    fn from(room: RoomId) -> Self {
        room.to_string()
    }
}

impl TryFrom<String> for RoomId {
    type Error = InvalidRoomId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
