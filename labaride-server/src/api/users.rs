//! User account endpoints
//!
//! Every route is scoped to `/{user_id}` and only serves the caller's own account.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{PasswordUpdate, User, UserUpdate};

use crate::auth::UserIdentity;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::util::{hash_password, normalize_email, verify_password};

#[derive(Serialize)]
pub struct UserBody {
    pub user: User,
}

#[derive(Serialize)]
pub struct HasShop {
    pub has_shop: bool,
}

/// Stored `YYYY-MM-DD` form of a client birthdate; blank clears it
fn normalize_birthdate(input: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(raw) = input.map(str::trim).filter(|b| !b.is_empty()) else {
        return Ok(None);
    };
    shared::util::parse_date(raw)
        .map(|d| Some(d.format("%Y-%m-%d").to_string()))
        .ok_or_else(|| AppError::validation("birthdate", "Invalid date format. Use YYYY-MM-DD"))
}

/// GET /user/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ServiceResult<ApiResponse<UserBody>> {
    identity.require_self(user_id)?;
    let user = db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(ApiResponse::success("User found", UserBody { user }))
}

/// GET /user/{user_id}/has_shop
pub async fn has_shop(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ServiceResult<ApiResponse<HasShop>> {
    identity.require_self(user_id)?;
    let shop = db::shops::find_by_owner(&state.pool, user_id).await?;
    Ok(ApiResponse::success(
        "Shop status retrieved",
        HasShop {
            has_shop: shop.is_some(),
        },
    ))
}

/// PUT /update_user_details/{user_id}
pub async fn update_details(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
    Json(req): Json<UserUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    identity.require_self(user_id)?;
    let existing = db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let birthdate = normalize_birthdate(req.birthdate.as_deref())?;
    let name = req.name.as_deref().unwrap_or(&existing.name);
    let email = req
        .email
        .as_deref()
        .map(normalize_email)
        .unwrap_or(existing.email);

    let update = db::users::ProfileUpdate {
        name,
        email: &email,
        phone: req.phone.as_deref(),
        birthdate: birthdate.as_deref(),
        gender: req.gender.as_deref(),
        zone: req.zone.as_deref(),
        street: req.street.as_deref(),
        barangay: req.barangay.as_deref(),
        building: req.building.as_deref(),
    };
    match db::users::update_profile(&state.pool, user_id, &update).await {
        Ok(true) => {}
        Ok(false) => return Err(AppError::new(ErrorCode::UserNotFound).into()),
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::EmailExists).into());
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(user_id, "Profile updated");
    Ok(ApiResponse::ok("Profile updated successfully"))
}

/// PUT /update_password/{user_id}
pub async fn update_password(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
    Json(req): Json<PasswordUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    identity.require_self(user_id)?;
    let credentials = db::users::find_credentials_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if !verify_password(&req.current_password, &credentials.password_hash) {
        return Err(AppError::with_message(
            ErrorCode::InvalidCredentials,
            "Current password is incorrect",
        )
        .into());
    }
    if req.new_password.chars().count() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort)
            .with_detail("field", "new_password")
            .into());
    }

    let password_hash = hash_password(&req.new_password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    db::users::update_password(&state.pool, user_id, &password_hash).await?;

    tracing::info!(user_id, "Password changed");
    Ok(ApiResponse::ok("Password updated successfully"))
}

/// DELETE /delete_account/{user_id}
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ServiceResult<ApiResponse<()>> {
    identity.require_self(user_id)?;
    if !db::users::delete(&state.pool, user_id).await? {
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    }
    tracing::info!(user_id, "Account deleted");
    Ok(ApiResponse::ok("Account deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birthdate_accepts_date_and_datetime() {
        assert_eq!(
            normalize_birthdate(Some("2001-04-09")).unwrap().as_deref(),
            Some("2001-04-09")
        );
        assert_eq!(
            normalize_birthdate(Some("2001-04-09T16:00:00.000Z"))
                .unwrap()
                .as_deref(),
            Some("2001-04-09")
        );
    }

    #[test]
    fn blank_birthdate_clears_it() {
        assert_eq!(normalize_birthdate(None).unwrap(), None);
        assert_eq!(normalize_birthdate(Some("  ")).unwrap(), None);
    }

    #[test]
    fn malformed_birthdate_names_the_field() {
        let err = normalize_birthdate(Some("April 9")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.unwrap()["field"], "birthdate");
    }
}
