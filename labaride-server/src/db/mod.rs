//! Database access layer

pub mod catalog;
pub mod notifications;
pub mod orders;
pub mod retry;
pub mod shops;
pub mod users;

/// Unique constraint hit (duplicate email, second shop for a user, ...)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Trivial round trip used by `/test-connection`
pub async fn ping(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
