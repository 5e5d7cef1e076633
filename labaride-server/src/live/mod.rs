//! RoomHub: realtime room fan-out
//!
//! ```text
//! OrderLifecycle ── Fanout::dispatch ──► RoomHub::emit(room, event)
//!                                             │ try_send per member
//!                                             ▼
//!                       rooms: RoomId → (SessionId → outbound queue)
//!                                             │
//!                                             ▼
//!                                 WS handler (drains queue → socket)
//! ```
//!
//! Delivery is best-effort: an empty room is a no-op, a full session queue
//! drops the event for that session, a closed queue is pruned.

pub mod fanout;
pub mod session;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use shared::realtime::{RoomId, ServerEvent};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

pub use fanout::{Fanout, LifecycleEvent};
pub use session::{Session, SessionId};

type Members = HashMap<SessionId, mpsc::Sender<ServerEvent>>;

/// Concurrent multimap of room → joined sessions
#[derive(Clone, Default)]
pub struct RoomHub {
    rooms: Arc<DashMap<RoomId, Members>>,
    next_id: Arc<AtomicU64>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection with a bounded outbound queue
    pub fn open_session(&self, user_id: i64, buffer: usize) -> (Session, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let session = Session {
            id,
            user_id,
            tx,
            rooms: HashSet::new(),
        };
        (session, rx)
    }

    /// Add the session to `room`; false if it was already a member
    pub fn join(&self, session: &mut Session, room: RoomId) -> bool {
        if !session.rooms.insert(room) {
            return false;
        }
        self.rooms
            .entry(room)
            .or_default()
            .insert(session.id, session.tx.clone());
        tracing::debug!(session = session.id, room = %room, "Joined room");
        true
    }

    /// Remove the session from `room`; false if it was not a member
    pub fn leave(&self, session: &mut Session, room: RoomId) -> bool {
        if !session.rooms.remove(&room) {
            return false;
        }
        self.detach(session.id, room);
        tracing::debug!(session = session.id, room = %room, "Left room");
        true
    }

    /// Disconnect: drop the session from every room it joined
    pub fn close(&self, session: Session) {
        for room in &session.rooms {
            self.detach(session.id, *room);
        }
        tracing::debug!(session = session.id, rooms = session.rooms.len(), "Session closed");
    }

    /// Push `event` to every session in `room`, returning how many accepted it
    pub fn emit(&self, room: RoomId, event: &ServerEvent) -> usize {
        let Some(mut members) = self.rooms.get_mut(&room) else {
            return 0;
        };

        let mut delivered = 0;
        let mut closed = Vec::new();
        for (id, tx) in members.iter() {
            match tx.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(session = id, room = %room, event = event.name(), "Session queue full, event dropped");
                }
                Err(TrySendError::Closed(_)) => closed.push(*id),
            }
        }
        for id in closed {
            members.remove(&id);
        }
        let empty = members.is_empty();
        drop(members);

        if empty {
            self.rooms.remove_if(&room, |_, m| m.is_empty());
        }
        delivered
    }

    /// Number of sessions currently joined to `room`
    #[cfg(test)]
    pub fn room_size(&self, room: RoomId) -> usize {
        self.rooms.get(&room).map(|m| m.len()).unwrap_or(0)
    }

    /// Number of rooms with at least one member
    #[cfg(test)]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn detach(&self, id: SessionId, room: RoomId) {
        let empty = match self.rooms.get_mut(&room) {
            Some(mut members) => {
                members.remove(&id);
                members.is_empty()
            }
            None => false,
        };
        if empty {
            self.rooms.remove_if(&room, |_, m| m.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ping() -> ServerEvent {
        ServerEvent::error("ping")
    }

    #[test]
    fn emit_to_empty_room_is_noop() {
        let hub = RoomHub::new();
        assert_eq!(hub.emit(RoomId::Shop(1), &ping()), 0);
        assert_eq!(hub.room_count(), 0);
    }

    #[tokio::test]
    async fn all_sessions_in_room_receive() {
        let hub = RoomHub::new();
        let (mut a, mut rx_a) = hub.open_session(1, 8);
        let (mut b, mut rx_b) = hub.open_session(2, 8);
        let (mut c, mut rx_c) = hub.open_session(7, 8);
        hub.join(&mut a, RoomId::Shop(42));
        hub.join(&mut b, RoomId::Shop(42));
        hub.join(&mut c, RoomId::User(7));

        assert_eq!(hub.emit(RoomId::Shop(42), &ping()), 2);
        assert_eq!(rx_a.recv().await, Some(ping()));
        assert_eq!(rx_b.recv().await, Some(ping()));
        assert!(rx_c.try_recv().is_err());
    }

    #[test]
    fn join_is_idempotent() {
        let hub = RoomHub::new();
        let (mut s, _rx) = hub.open_session(1, 8);
        assert!(hub.join(&mut s, RoomId::User(1)));
        assert!(!hub.join(&mut s, RoomId::User(1)));
        assert_eq!(hub.room_size(RoomId::User(1)), 1);
    }

    #[test]
    fn leave_and_close_clean_up_rooms() {
        let hub = RoomHub::new();
        let (mut s, _rx) = hub.open_session(1, 8);
        hub.join(&mut s, RoomId::User(1));
        hub.join(&mut s, RoomId::Shop(3));
        assert_eq!(hub.room_count(), 2);

        assert!(hub.leave(&mut s, RoomId::Shop(3)));
        assert!(!hub.leave(&mut s, RoomId::Shop(3)));
        assert_eq!(hub.room_size(RoomId::Shop(3)), 0);

        hub.close(s);
        assert_eq!(hub.room_count(), 0);
    }

    #[test]
    fn closed_receivers_are_pruned_on_emit() {
        let hub = RoomHub::new();
        let (mut s, rx) = hub.open_session(1, 8);
        hub.join(&mut s, RoomId::Shop(5));
        drop(rx);
        assert_eq!(hub.emit(RoomId::Shop(5), &ping()), 0);
        assert_eq!(hub.room_size(RoomId::Shop(5)), 0);
    }

    #[tokio::test]
    async fn full_queue_drops_without_blocking() {
        let hub = RoomHub::new();
        let (mut s, mut rx) = hub.open_session(1, 1);
        hub.join(&mut s, RoomId::User(1));
        assert_eq!(hub.emit(RoomId::User(1), &ping()), 1);
        assert_eq!(hub.emit(RoomId::User(1), &ServerEvent::error("second")), 0);
        assert_eq!(rx.recv().await, Some(ping()));
        assert_eq!(hub.room_size(RoomId::User(1)), 1);
    }

    #[tokio::test]
    async fn concurrent_joins_and_leaves() {
        let hub = RoomHub::new();
        let mut handles = Vec::new();
        for user in 0..32 {
            let hub = hub.clone();
            handles.push(tokio::spawn(async move {
                let (mut s, _rx) = hub.open_session(user, 4);
                hub.join(&mut s, RoomId::Shop(1));
                hub.join(&mut s, RoomId::User(user));
                if user % 2 == 0 {
                    hub.close(s);
                    None
                } else {
                    Some((s, _rx))
                }
            }));
        }
        let mut kept = Vec::new();
        for h in handles {
            if let Some(pair) = h.await.unwrap() {
                kept.push(pair);
            }
        }
        assert_eq!(hub.room_size(RoomId::Shop(1)), 16);
        assert_eq!(hub.room_count(), 17);
    }

    #[test]
    fn session_ids_are_unique() {
        let hub = RoomHub::new();
        let (a, _ra) = hub.open_session(1, 1);
        let (b, _rb) = hub.open_session(1, 1);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.user_id(), 1);
    }
}
