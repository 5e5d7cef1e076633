//! Shared types for LabaRide
//!
//! Types used by the server and by Rust clients: the unified error system,
//! domain models, the order status state machine and the realtime protocol.

pub mod error;
pub mod models;
pub mod order;
pub mod realtime;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use order::OrderStatus;
pub use realtime::{ClientCommand, RoomId, ServerEvent};
