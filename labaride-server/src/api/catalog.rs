//! Catalog endpoints: services, household items, clothing types, kilo prices
//!
//! Reads are open to any signed-in user; writes need the owning shop.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    CatalogEntryCreate, ClothingType, HouseholdItem, KiloPrice, KiloPriceCreate, KiloRange,
    PriceUpdate, ServiceCreate, ServiceUpdate, ShopService,
};

use crate::auth::UserIdentity;
use crate::db::{self, catalog};
use crate::error::ServiceResult;
use crate::state::AppState;

use super::{owned_shop, required};

#[derive(Serialize)]
pub struct Services {
    pub services: Vec<ShopService>,
}

#[derive(Serialize)]
pub struct Items {
    pub items: Vec<HouseholdItem>,
}

#[derive(Serialize)]
pub struct Types {
    pub types: Vec<ClothingType>,
}

#[derive(Serialize)]
pub struct Prices {
    pub prices: Vec<KiloPrice>,
}

#[derive(Serialize)]
pub struct ServiceCreated {
    pub service_id: i64,
}

#[derive(Serialize)]
pub struct ItemCreated {
    pub item_id: i64,
}

#[derive(Serialize)]
pub struct TypeCreated {
    pub type_id: i64,
}

#[derive(Serialize)]
pub struct PriceCreated {
    pub price_id: i64,
}

fn non_negative(value: Decimal, field: &str) -> Result<Decimal, AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::validation(field, format!("{field} cannot be negative")));
    }
    Ok(value)
}

/// Validated bracket, rejected when it overlaps any existing one
fn check_bracket(new: &KiloPriceCreate, existing: &[KiloPrice]) -> Result<(), AppError> {
    non_negative(new.min_kilo, "min_kilo")?;
    non_negative(new.price_per_kilo, "price_per_kilo")?;
    if new.min_kilo > new.max_kilo {
        return Err(AppError::validation(
            "max_kilo",
            "max_kilo must not be less than min_kilo",
        ));
    }

    let range = KiloRange::new(new.min_kilo, new.max_kilo);
    if let Some(clash) = existing.iter().find(|p| range.overlaps(&KiloRange::from(*p))) {
        return Err(AppError::with_message(
            ErrorCode::KiloRangeOverlap,
            "This range overlaps with an existing range",
        )
        .with_detail("field", "min_kilo")
        .with_detail("price_id", clash.id));
    }
    Ok(())
}

// ── Services ──

/// GET /shop/{shop_id}/services
pub async fn list_services(
    State(state): State<AppState>,
    Path(shop_id): Path<i64>,
) -> ServiceResult<ApiResponse<Services>> {
    let services = catalog::services_for_shop(&state.pool, shop_id).await?;
    Ok(ApiResponse::success("Services retrieved", Services { services }))
}

/// GET /shop/services
pub async fn all_services(State(state): State<AppState>) -> ServiceResult<ApiResponse<Services>> {
    let services = catalog::active_services(&state.pool).await?;
    Ok(ApiResponse::success("Services retrieved", Services { services }))
}

/// POST /shop/{shop_id}/service
pub async fn create_service(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(shop_id): Path<i64>,
    Json(req): Json<ServiceCreate>,
) -> ServiceResult<ApiResponse<ServiceCreated>> {
    owned_shop(&state, shop_id, &identity).await?;
    let name = required(Some(req.service_name.as_str()), "service_name")?;
    let price = non_negative(req.price, "price")?;

    let service_id =
        catalog::create_service(&state.pool, shop_id, name, req.color.as_deref(), price).await?;
    tracing::info!(shop_id, service_id, "Service added");
    Ok(ApiResponse::created(
        "Service added successfully",
        ServiceCreated { service_id },
    ))
}

/// PUT /shop/service/{service_id}
pub async fn update_service(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(service_id): Path<i64>,
    Json(req): Json<ServiceUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    let service = catalog::find_service(&state.pool, service_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CatalogItemNotFound))?;
    owned_shop(&state, service.shop_id, &identity).await?;
    let name = required(Some(req.name.as_str()), "name")?;
    let price = non_negative(req.price, "price")?;

    catalog::update_service(&state.pool, service_id, name, price).await?;
    Ok(ApiResponse::ok("Service updated successfully"))
}

/// DELETE /shop/service/{service_id}
pub async fn delete_service(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(service_id): Path<i64>,
) -> ServiceResult<ApiResponse<()>> {
    let service = catalog::find_service(&state.pool, service_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CatalogItemNotFound))?;
    owned_shop(&state, service.shop_id, &identity).await?;

    catalog::delete_service(&state.pool, service_id).await?;
    tracing::info!(shop_id = service.shop_id, service_id, "Service deleted");
    Ok(ApiResponse::ok("Service deleted successfully"))
}

// ── Household items ──

/// GET /shop/{shop_id}/household
pub async fn list_household_items(
    State(state): State<AppState>,
    Path(shop_id): Path<i64>,
) -> ServiceResult<ApiResponse<Items>> {
    let items = catalog::household_items(&state.pool, shop_id).await?;
    Ok(ApiResponse::success("Items retrieved", Items { items }))
}

/// GET /shop/items
pub async fn all_household_items(State(state): State<AppState>) -> ServiceResult<ApiResponse<Items>> {
    let items = catalog::all_household_items(&state.pool).await?;
    Ok(ApiResponse::success("Items retrieved", Items { items }))
}

/// POST /shop/{shop_id}/household
pub async fn create_household_item(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(shop_id): Path<i64>,
    Json(req): Json<CatalogEntryCreate>,
) -> ServiceResult<ApiResponse<ItemCreated>> {
    owned_shop(&state, shop_id, &identity).await?;
    let name = required(Some(req.name.as_str()), "name")?;
    let price = non_negative(req.price, "price")?;

    if let Some(item_id) = catalog::find_household_item_by_name(&state.pool, shop_id, name).await? {
        return Err(
            AppError::with_message(ErrorCode::CatalogItemExists, "Item already exists")
                .with_detail("item_id", item_id)
                .into(),
        );
    }

    let item_id = match catalog::create_household_item(&state.pool, shop_id, name, price).await {
        Ok(id) => id,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(
                AppError::with_message(ErrorCode::CatalogItemExists, "Item already exists").into(),
            );
        }
        Err(e) => return Err(e.into()),
    };
    Ok(ApiResponse::created(
        "Item added successfully",
        ItemCreated { item_id },
    ))
}

/// PUT /shop/household/{item_id}
pub async fn update_household_price(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(item_id): Path<i64>,
    Json(req): Json<PriceUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    let item = catalog::find_household_item(&state.pool, item_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CatalogItemNotFound))?;
    owned_shop(&state, item.shop_id, &identity).await?;
    let price = non_negative(req.price, "price")?;

    catalog::update_household_price(&state.pool, item_id, price).await?;
    Ok(ApiResponse::ok("Item updated successfully"))
}

// ── Clothing types ──

/// GET /shop/{shop_id}/clothing
pub async fn list_clothing_types(
    State(state): State<AppState>,
    Path(shop_id): Path<i64>,
) -> ServiceResult<ApiResponse<Types>> {
    let types = catalog::clothing_types(&state.pool, shop_id).await?;
    Ok(ApiResponse::success("Types retrieved", Types { types }))
}

/// POST /shop/{shop_id}/clothing
pub async fn create_clothing_type(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(shop_id): Path<i64>,
    Json(req): Json<CatalogEntryCreate>,
) -> ServiceResult<ApiResponse<TypeCreated>> {
    owned_shop(&state, shop_id, &identity).await?;
    let name = required(Some(req.name.as_str()), "name")?;
    let price = non_negative(req.price, "price")?;

    if let Some(type_id) = catalog::find_clothing_type_by_name(&state.pool, shop_id, name).await? {
        return Err(
            AppError::with_message(ErrorCode::CatalogItemExists, "Type already exists")
                .with_detail("type_id", type_id)
                .into(),
        );
    }

    let type_id = match catalog::create_clothing_type(&state.pool, shop_id, name, price).await {
        Ok(id) => id,
        Err(e) if db::is_unique_violation(&e) => {
            return Err(
                AppError::with_message(ErrorCode::CatalogItemExists, "Type already exists").into(),
            );
        }
        Err(e) => return Err(e.into()),
    };
    Ok(ApiResponse::created(
        "Clothing type added successfully",
        TypeCreated { type_id },
    ))
}

/// PUT /shop/clothing/{type_id}
pub async fn update_clothing_price(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(type_id): Path<i64>,
    Json(req): Json<PriceUpdate>,
) -> ServiceResult<ApiResponse<()>> {
    let clothing = catalog::find_clothing_type(&state.pool, type_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CatalogItemNotFound))?;
    owned_shop(&state, clothing.shop_id, &identity).await?;
    let price = non_negative(req.price, "price")?;

    catalog::update_clothing_price(&state.pool, type_id, price).await?;
    Ok(ApiResponse::ok("Type updated successfully"))
}

// ── Kilo prices ──

/// GET /shop/{shop_id}/kilo-prices
pub async fn list_kilo_prices(
    State(state): State<AppState>,
    Path(shop_id): Path<i64>,
) -> ServiceResult<ApiResponse<Prices>> {
    let prices = catalog::kilo_prices(&state.pool, shop_id).await?;
    Ok(ApiResponse::success("Prices retrieved", Prices { prices }))
}

/// POST /shop/{shop_id}/kilo-price
pub async fn create_kilo_price(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(shop_id): Path<i64>,
    Json(req): Json<KiloPriceCreate>,
) -> ServiceResult<ApiResponse<PriceCreated>> {
    owned_shop(&state, shop_id, &identity).await?;
    let existing = catalog::kilo_prices(&state.pool, shop_id).await?;
    check_bracket(&req, &existing)?;

    let price_id = catalog::create_kilo_price(&state.pool, shop_id, &req).await?;
    tracing::info!(shop_id, price_id, min = %req.min_kilo, max = %req.max_kilo, "Kilo price added");
    Ok(ApiResponse::created(
        "Price range added successfully",
        PriceCreated { price_id },
    ))
}

/// DELETE /shop/{shop_id}/kilo-price
pub async fn delete_kilo_price(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(shop_id): Path<i64>,
    Json(req): Json<KiloRange>,
) -> ServiceResult<ApiResponse<()>> {
    owned_shop(&state, shop_id, &identity).await?;
    if !catalog::delete_kilo_price(&state.pool, shop_id, req.min_kilo, req.max_kilo).await? {
        return Err(AppError::with_message(
            ErrorCode::CatalogItemNotFound,
            "Price range not found",
        )
        .into());
    }
    Ok(ApiResponse::ok("Price range deleted successfully"))
}
