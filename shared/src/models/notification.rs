//! Notification Model

use serde::{Deserialize, Serialize};

/// Durable per-user notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    /// Sender display name (the shop name for price notifications)
    pub from_name: String,
    pub is_read: bool,
    pub created_at: i64,
}

/// Notification about to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCreate {
    pub user_id: i64,
    pub message: String,
    pub from_name: String,
}
