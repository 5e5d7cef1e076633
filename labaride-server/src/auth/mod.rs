//! Identity gateway: user JWTs and login/signup rate limiting

pub mod rate_limit;
pub mod user_auth;

pub use rate_limit::RateLimiter;
pub use user_auth::{UserIdentity, create_token, user_auth_middleware, verify_token};
