//! Realtime socket protocol
//!
//! Server → Client: [`ServerEvent`] (room pushes and direct replies)
//! Client → Server: [`ClientCommand`] (room membership control)
//!
//! Frames are JSON objects `{"event": <name>, "data": <payload>}`.

pub mod protocol;
pub mod room;

pub use protocol::*;
pub use room::{InvalidRoomId, RoomId};
