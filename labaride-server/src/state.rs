//! Application state for labaride-server

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::auth::RateLimiter;
use crate::config::Config;
use crate::db::orders::PgOrderStore;
use crate::db::retry::RetryPolicy;
use crate::live::{Fanout, RoomHub};
use crate::orders::OrderLifecycle;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// HS256 secret for user tokens
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Realtime room membership
    pub rooms: RoomHub,
    /// Order state machine + fan-out
    pub lifecycle: OrderLifecycle,
    /// Rate limiter for login/signup routes
    pub rate_limiter: RateLimiter,
    /// Outbound queue size per realtime session
    pub ws_session_buffer: usize,
}

impl AppState {
    /// Connect, run migrations and wire the lifecycle core
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_timeout)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::with_pool(pool, config))
    }

    pub fn with_pool(pool: PgPool, config: &Config) -> Self {
        let rooms = RoomHub::new();
        let store = PgOrderStore::new(
            pool.clone(),
            RetryPolicy::new(config.db_timeout, config.db_retries),
        );
        let lifecycle = OrderLifecycle::new(Arc::new(store), Fanout::new(rooms.clone()));

        Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiry_hours: config.jwt_expiry_hours,
            rooms,
            lifecycle,
            rate_limiter: RateLimiter::new(),
            ws_session_buffer: config.ws_session_buffer,
        }
    }
}
