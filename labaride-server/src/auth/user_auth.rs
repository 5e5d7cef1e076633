//! User JWT authentication

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated user identity extracted from JWT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: i64,
    pub email: String,
}

impl UserIdentity {
    /// Caller may only touch their own `/{user_id}` resources
    pub fn require_self(&self, user_id: i64) -> Result<(), AppError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::forbidden("Cannot access another user's account"))
        }
    }
}

pub fn create_token(
    user_id: i64,
    email: &str,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = UserClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (now + chrono::Duration::hours(expiry_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a token into the identity it carries
pub fn verify_token(token: &str, secret: &str) -> Result<UserIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let user_id = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::invalid_token("Invalid token subject"))?;

    Ok(UserIdentity {
        user_id,
        email: token_data.claims.email,
    })
}

/// Token from an `Authorization: Bearer <token>` header value (scheme is case-insensitive)
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let header = header.ok_or_else(AppError::not_authenticated)?;
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format"))?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::invalid_token("Invalid authentication scheme"));
    }
    Ok(token.trim())
}

/// Middleware that extracts and verifies the user JWT from the Authorization header
pub async fn user_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let identity = bearer_token(header)
        .and_then(|token| verify_token(token, &state.jwt_secret))
        .map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    const SECRET: &str = "test-secret-with-enough-entropy";

    #[test]
    fn token_round_trip() {
        let token = create_token(7, "ana@example.com", SECRET, 24).unwrap();
        let identity = verify_token(&token, SECRET).unwrap();
        assert_eq!(
            identity,
            UserIdentity {
                user_id: 7,
                email: "ana@example.com".into()
            }
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(7, "ana@example.com", SECRET, 24).unwrap();
        let err = verify_token(&token, "another-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let token = create_token(7, "ana@example.com", SECRET, -2).unwrap();
        let err = verify_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn garbage_token_is_invalid() {
        let err = verify_token("not.a.jwt", SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(bearer_token(Some("bearer abc")).unwrap(), "abc");
        assert_eq!(
            bearer_token(None).unwrap_err().code,
            ErrorCode::NotAuthenticated
        );
        assert_eq!(
            bearer_token(Some("abc")).unwrap_err().code,
            ErrorCode::TokenInvalid
        );
        assert_eq!(
            bearer_token(Some("Basic abc")).unwrap_err().code,
            ErrorCode::TokenInvalid
        );
    }

    #[test]
    fn require_self_blocks_other_users() {
        let identity = UserIdentity {
            user_id: 7,
            email: "ana@example.com".into(),
        };
        assert!(identity.require_self(7).is_ok());
        assert_eq!(
            identity.require_self(8).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
    }
}
