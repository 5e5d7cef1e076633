//! Order lifecycle
//!
//! - **lifecycle**: `OrderLifecycle`, the state-machine driver for every order intent
//! - **input**: request parsing and validation (money, required fields, cancel notes)
//! - **store**: `OrderStore` persistence seam (Postgres in production, memory in tests)
//!
//! ```text
//! HTTP handler → OrderLifecycle → OrderStore (CAS on status)
//!                      │
//!                      ▼
//!                   Fanout → notifications table + RoomHub
//! ```

pub mod error;
pub mod input;
pub mod lifecycle;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use error::OrderError;
pub use lifecycle::{Actor, OrderLifecycle};
pub use store::{NewOrder, OrderStore, StatusChange, TransitionOutcome};
