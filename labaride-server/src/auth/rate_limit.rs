//! Per-IP fixed-window rate limiting for login and signup

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

/// Window entries older than this are dropped by `cleanup`
const STALE_AFTER: Duration = Duration::from_secs(300);

struct Window {
    hits: u32,
    started: Instant,
}

/// Route-scoped request budget
#[derive(Debug, Clone, Copy)]
pub struct Limit {
    pub route: &'static str,
    pub max_requests: u32,
    pub window: Duration,
}

pub const LOGIN_LIMIT: Limit = Limit {
    route: "login",
    max_requests: 5,
    window: Duration::from_secs(60),
};

pub const SIGNUP_LIMIT: Limit = Limit {
    route: "signup",
    max_requests: 3,
    window: Duration::from_secs(60),
};

#[derive(Clone, Default)]
pub struct RateLimiter {
    /// route -> (client IP -> window)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, Window>>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request; false once the client exceeded the limit for this window
    pub async fn allow(&self, limit: Limit, ip: &str) -> bool {
        let mut routes = self.inner.lock().await;
        let now = Instant::now();
        let window = routes
            .entry(limit.route)
            .or_default()
            .entry(ip.to_owned())
            .or_insert_with(|| Window {
                hits: 0,
                started: now,
            });

        if now.duration_since(window.started) >= limit.window {
            window.hits = 0;
            window.started = now;
        }

        window.hits += 1;
        window.hits <= limit.max_requests
    }

    pub async fn cleanup(&self) {
        let mut routes = self.inner.lock().await;
        let now = Instant::now();
        for clients in routes.values_mut() {
            clients.retain(|_, w| now.duration_since(w.started) < STALE_AFTER);
        }
        routes.retain(|_, clients| !clients.is_empty());
    }

    #[cfg(test)]
    pub async fn tracked_clients(&self) -> usize {
        self.inner.lock().await.values().map(HashMap::len).sum()
    }
}

/// Client IP: first `X-Forwarded-For` hop, else the peer address
fn client_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_owned();
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn enforce(state: &AppState, limit: Limit, request: Request, next: Next) -> Response {
    let ip = client_ip(&request);
    if !state.rate_limiter.allow(limit, &ip).await {
        tracing::warn!(route = limit.route, ip = %ip, "Rate limit exceeded");
        return AppError::with_message(ErrorCode::RateLimited, "Too many requests, try again later")
            .into_response();
    }
    next.run(request).await
}

/// Login: 5 requests/minute per IP
pub async fn login_rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(&state, LOGIN_LIMIT, request, next).await
}

/// Signup: 3 requests/minute per IP
pub async fn signup_rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(&state, SIGNUP_LIMIT, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::new();
        for _ in 0..SIGNUP_LIMIT.max_requests {
            assert!(limiter.allow(SIGNUP_LIMIT, "10.0.0.1").await);
        }
        assert!(!limiter.allow(SIGNUP_LIMIT, "10.0.0.1").await);
        assert!(limiter.allow(SIGNUP_LIMIT, "10.0.0.2").await);
        assert!(limiter.allow(LOGIN_LIMIT, "10.0.0.1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn window_resets_after_expiry() {
        let limiter = RateLimiter::new();
        for _ in 0..=LOGIN_LIMIT.max_requests {
            limiter.allow(LOGIN_LIMIT, "10.0.0.1").await;
        }
        assert!(!limiter.allow(LOGIN_LIMIT, "10.0.0.1").await);

        tokio::time::advance(LOGIN_LIMIT.window).await;
        assert!(limiter.allow(LOGIN_LIMIT, "10.0.0.1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_drops_stale_clients() {
        let limiter = RateLimiter::new();
        limiter.allow(LOGIN_LIMIT, "10.0.0.1").await;
        limiter.allow(SIGNUP_LIMIT, "10.0.0.2").await;
        assert_eq!(limiter.tracked_clients().await, 2);

        tokio::time::advance(STALE_AFTER).await;
        limiter.allow(LOGIN_LIMIT, "10.0.0.3").await;
        limiter.cleanup().await;
        assert_eq!(limiter.tracked_clients().await, 1);
    }
}
