//! Authentication endpoints: signup, login, verify_token

use axum::{Json, extract::State, http::HeaderMap};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{LoginRequest, SignupRequest};

use crate::auth::{self, user_auth::bearer_token};
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util::{hash_password, normalize_email, verify_password};

use super::required;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Serialize)]
pub struct SignupResponse {
    pub user_id: i64,
    pub token: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub is_shop_owner: bool,
}

#[derive(Serialize)]
pub struct TokenStatus {
    pub valid: bool,
    pub user_id: i64,
    pub email: String,
}

fn issue_token(state: &AppState, user_id: i64, email: &str) -> Result<String, AppError> {
    auth::create_token(user_id, email, &state.jwt_secret, state.jwt_expiry_hours).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ServiceResult<ApiResponse<SignupResponse>> {
    let name = required(req.name.as_deref(), "name")?;
    let email = normalize_email(required(req.email.as_deref(), "email")?);
    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::required("password"))?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        )
        .with_detail("field", "password")
        .into());
    }

    if db::users::find_credentials_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailExists).into());
    }

    let password_hash = hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let new_user = db::users::NewUser {
        name,
        email: &email,
        password_hash: &password_hash,
        phone: req.phone.as_deref(),
        gender: req.gender.as_deref(),
        zone: req.zone.as_deref(),
        street: req.street.as_deref(),
        barangay: req.barangay.as_deref(),
        building: req.building.as_deref(),
    };
    let user_id = match db::users::create(&state.pool, &new_user, shared::util::now_millis()).await {
        Ok(id) => id,
        // Lost a race with a concurrent signup for the same email
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::EmailExists).into());
        }
        Err(e) => return Err(e.into()),
    };

    let token = issue_token(&state, user_id, &email)?;
    tracing::info!(user_id, "User registered");

    Ok(ApiResponse::created(
        "User registered successfully",
        SignupResponse { user_id, token },
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ServiceResult<ApiResponse<LoginResponse>> {
    let email = normalize_email(&req.email);
    let credentials = db::users::find_credentials_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &credentials.password_hash) {
        return Err(AppError::invalid_credentials().into());
    }

    let token = issue_token(&state, credentials.id, &credentials.email)?;

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            token,
            user_id: credentials.id,
            is_shop_owner: credentials.is_shop_owner,
        },
    ))
}

/// POST /verify_token
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ServiceResult<ApiResponse<TokenStatus>> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let identity = auth::verify_token(bearer_token(header)?, &state.jwt_secret)?;

    Ok(ApiResponse::success(
        "Token is valid",
        TokenStatus {
            valid: true,
            user_id: identity.user_id,
            email: identity.email,
        },
    ))
}
