//! Order lifecycle types shared by server and clients

pub mod status;

pub use status::{InvalidTransition, OrderStatus, UnknownStatus};
