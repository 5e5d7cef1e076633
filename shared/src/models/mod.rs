//! Data models
//!
//! Shared between labaride-server and clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL), timestamps are Unix millis.
//! Money is `rust_decimal::Decimal`, serialized as a JSON number.

pub mod catalog;
pub mod notification;
pub mod order;
pub mod shop;
pub mod user;

// Re-exports
pub use catalog::*;
pub use notification::*;
pub use order::*;
pub use shop::*;
pub use user::*;
