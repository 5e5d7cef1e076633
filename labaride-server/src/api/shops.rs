//! Shop endpoints: registration, public listings, owner updates

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Shop, ShopRegistration, ShopUpdate, ShopWithOwner};

use crate::auth::UserIdentity;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

use super::{owned_shop, required};

const RECENT_SHOPS: i64 = 10;

#[derive(Serialize)]
pub struct ShopRegistered {
    pub shop_id: i64,
}

#[derive(Serialize)]
pub struct ShopList<T> {
    pub shops: Vec<T>,
}

#[derive(Serialize)]
pub struct ShopBody {
    pub shop: Shop,
}

/// Required registration fields, validated in declaration order
fn validate_registration(req: &ShopRegistration) -> Result<db::shops::NewShop<'_>, AppError> {
    Ok(db::shops::NewShop {
        shop_name: required(req.shop_name.as_deref(), "shop_name")?,
        contact_number: required(req.contact_number.as_deref(), "contact_number")?,
        zone: required(req.zone.as_deref(), "zone")?,
        street: required(req.street.as_deref(), "street")?,
        barangay: required(req.barangay.as_deref(), "barangay")?,
        building: req.building.as_deref().map(str::trim).filter(|b| !b.is_empty()),
        opening_time: required(req.opening_time.as_deref(), "opening_time")?,
        closing_time: required(req.closing_time.as_deref(), "closing_time")?,
    })
}

/// POST /register_shop/{user_id}
pub async fn register_shop(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
    Json(req): Json<ShopRegistration>,
) -> ServiceResult<ApiResponse<ShopRegistered>> {
    identity.require_self(user_id)?;
    let new_shop = validate_registration(&req)?;

    if db::users::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    }
    if db::shops::find_by_owner(&state.pool, user_id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::ShopAlreadyRegistered).into());
    }

    let shop_id = match db::shops::create_with_services(
        &state.pool,
        user_id,
        &new_shop,
        &req.services,
        shared::util::now_millis(),
    )
    .await
    {
        Ok(id) => id,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(AppError::new(ErrorCode::ShopAlreadyRegistered).into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id, shop_id, services = req.services.len(), "Shop registered");
    Ok(ApiResponse::created(
        "Shop registered successfully",
        ShopRegistered { shop_id },
    ))
}

/// GET /shops
pub async fn list_shops(
    State(state): State<AppState>,
) -> ServiceResult<ApiResponse<ShopList<ShopWithOwner>>> {
    let shops = db::shops::list_with_owners(&state.pool).await?;
    Ok(ApiResponse::success("Shops retrieved", ShopList { shops }))
}

/// GET /shops/recent
pub async fn recent_shops(State(state): State<AppState>) -> ServiceResult<ApiResponse<ShopList<Shop>>> {
    let shops = db::shops::list(&state.pool, Some(RECENT_SHOPS)).await?;
    Ok(ApiResponse::success("Recent shops retrieved", ShopList { shops }))
}

/// GET /shop/{shop_id}
pub async fn get_shop(
    State(state): State<AppState>,
    Path(shop_id): Path<i64>,
) -> ServiceResult<ApiResponse<ShopBody>> {
    let shop = db::shops::find_by_id(&state.pool, shop_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ShopNotFound))?;
    Ok(ApiResponse::success("Shop found", ShopBody { shop }))
}

/// PUT /shop/{shop_id}
pub async fn update_shop(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(shop_id): Path<i64>,
    Json(req): Json<ShopUpdate>,
) -> ServiceResult<ApiResponse<ShopBody>> {
    owned_shop(&state, shop_id, &identity).await?;
    let shop = db::shops::update(&state.pool, shop_id, &req)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ShopNotFound))?;
    tracing::info!(shop_id, "Shop updated");
    Ok(ApiResponse::success("Shop updated successfully", ShopBody { shop }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShopRegistration {
        ShopRegistration {
            shop_name: Some("Suds & Bubbles".into()),
            contact_number: Some("09171234567".into()),
            zone: Some("Zone 3".into()),
            street: Some("Rizal St".into()),
            barangay: Some("Poblacion".into()),
            building: Some("  ".into()),
            opening_time: Some("08:00".into()),
            closing_time: Some("18:00".into()),
            services: Vec::new(),
        }
    }

    #[test]
    fn complete_registration_passes() {
        let req = complete();
        let shop = validate_registration(&req).unwrap();
        assert_eq!(shop.shop_name, "Suds & Bubbles");
        assert_eq!(shop.building, None);
    }

    #[test]
    fn first_missing_field_is_reported() {
        let req = ShopRegistration {
            barangay: None,
            opening_time: None,
            ..complete()
        };
        let err = validate_registration(&req).unwrap_err();
        assert_eq!(err.message, "Missing barangay");
        assert_eq!(err.details.unwrap()["field"], "barangay");
    }
}
