//! Server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP + WebSocket port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for user tokens
    pub jwt_secret: String,
    /// Token lifetime
    pub jwt_expiry_hours: i64,
    /// Pool size
    pub db_max_connections: u32,
    /// Upper bound for a single persistence attempt
    pub db_timeout: Duration,
    /// Extra attempts after a transient persistence failure
    pub db_retries: u32,
    /// Events queued per realtime session before new ones are dropped
    pub ws_session_buffer: usize,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    ///
    /// In development a random per-process value is used; tokens issued by one
    /// run do not verify in the next.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => Ok(v),
            _ if environment == "development" => {
                tracing::warn!("{name} not set, using a random development secret");
                Ok(crate::util::random_secret())
            }
            Ok(_) => Err(format!("{name} must not be empty in {environment} environment").into()),
            Err(_) => Err(format!("{name} must be set in {environment} environment").into()),
        }
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: Self::parse_or("HTTP_PORT", 5000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiry_hours: Self::parse_or("JWT_EXPIRY_HOURS", 24),
            db_max_connections: Self::parse_or("DB_MAX_CONNECTIONS", 10),
            db_timeout: Duration::from_millis(Self::parse_or("DB_TIMEOUT_MS", 5000)),
            db_retries: Self::parse_or("DB_RETRIES", 1),
            ws_session_buffer: Self::parse_or::<usize>("WS_SESSION_BUFFER", 64).max(1),
            environment,
        })
    }
}
