//! Per-connection session handle

use std::collections::HashSet;

use shared::realtime::{RoomId, ServerEvent};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

pub type SessionId = u64;

/// One live socket connection
///
/// Owns the outbound queue sender and the set of rooms it has joined.
/// Created by [`RoomHub::open_session`](super::RoomHub::open_session) and
/// handed back to [`RoomHub::close`](super::RoomHub::close) on disconnect.
#[derive(Debug)]
pub struct Session {
    pub(super) id: SessionId,
    pub(super) user_id: i64,
    pub(super) tx: mpsc::Sender<ServerEvent>,
    pub(super) rooms: HashSet<RoomId>,
}

impl Session {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Authenticated user behind this connection
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn rooms(&self) -> &HashSet<RoomId> {
        &self.rooms
    }

    #[cfg(test)]
    pub fn is_member(&self, room: &RoomId) -> bool {
        self.rooms.contains(room)
    }

    /// Reply to this session only (join acks, command errors)
    pub fn send_direct(&self, event: ServerEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(session = self.id, event = event.name(), "Session queue full, dropping reply");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }
}
