use shared::models::{Notification, NotificationCreate};
use sqlx::PgPool;

pub async fn insert(
    pool: &PgPool,
    notification: &NotificationCreate,
    now: i64,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO notifications (user_id, message, from_name, is_read, created_at)
         VALUES ($1, $2, $3, FALSE, $4)
         RETURNING *",
    )
    .bind(notification.user_id)
    .bind(&notification.message)
    .bind(&notification.from_name)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Newest first
pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn find(pool: &PgPool, notification_id: i64) -> Result<Option<Notification>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM notifications WHERE id = $1")
        .bind(notification_id)
        .fetch_optional(pool)
        .await
}

pub async fn mark_read(pool: &PgPool, notification_id: i64) -> Result<Option<Notification>, sqlx::Error> {
    sqlx::query_as("UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *")
        .bind(notification_id)
        .fetch_optional(pool)
        .await
}
