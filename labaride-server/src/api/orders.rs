//! Order endpoints
//!
//! Mutations go through `OrderLifecycle` so every status change is a checked
//! state-machine edge and fans out to the realtime rooms. Reads hit the
//! database directly.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    CancelRequest, Order, OrderCreateRequest, OrderQuery, OrderWithShop, SetPriceRequest,
    StatusUpdateRequest,
};
use shared::order::OrderStatus;

use crate::auth::UserIdentity;
use crate::db;
use crate::error::ServiceResult;
use crate::orders::Actor;
use crate::orders::input::parse_status;
use crate::state::AppState;

use super::owned_shop;

#[derive(Serialize)]
pub struct OrderCreated {
    pub transaction_id: i64,
    pub shop_id: i64,
}

#[derive(Serialize)]
pub struct OrderBody<T> {
    pub transaction: T,
}

#[derive(Serialize)]
pub struct OrderList {
    pub transactions: Vec<Order>,
}

#[derive(Serialize)]
pub struct ShopOrders {
    pub orders: Vec<Order>,
}

fn actor(identity: &UserIdentity) -> Actor {
    Actor::new(identity.user_id)
}

fn status_filter(status: Option<&str>) -> Result<Option<OrderStatus>, AppError> {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_status(s).map_err(AppError::from))
        .transpose()
}

/// POST /create_transaction/{user_id}
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
    Json(req): Json<OrderCreateRequest>,
) -> ServiceResult<ApiResponse<OrderCreated>> {
    let order = state
        .lifecycle
        .create(actor(&identity), user_id, &req)
        .await?;
    Ok(ApiResponse::created(
        "Transaction created successfully",
        OrderCreated {
            transaction_id: order.id,
            shop_id: order.shop_id,
        },
    ))
}

/// GET /transaction/{transaction_id} (customer or shop owner only)
pub async fn get_transaction(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(transaction_id): Path<i64>,
) -> ServiceResult<ApiResponse<OrderBody<OrderWithShop>>> {
    let order = db::orders::find(&state.pool, transaction_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let shop = db::shops::find_by_id(&state.pool, order.shop_id).await?;

    let is_owner = shop.as_ref().is_some_and(|s| s.user_id == identity.user_id);
    if order.user_id != identity.user_id && !is_owner {
        return Err(AppError::forbidden("Not a party to this transaction").into());
    }

    Ok(ApiResponse::success(
        "Transaction found",
        OrderBody {
            transaction: OrderWithShop { order, shop },
        },
    ))
}

/// GET /user_transactions/{user_id}
pub async fn user_transactions(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ServiceResult<ApiResponse<OrderList>> {
    identity.require_self(user_id)?;
    let transactions = db::orders::list_for_user(&state.pool, user_id).await?;
    Ok(ApiResponse::success(
        "Transactions retrieved",
        OrderList { transactions },
    ))
}

/// GET /shop_transactions/{shop_id}?status=
pub async fn shop_transactions(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(shop_id): Path<i64>,
    Query(query): Query<OrderQuery>,
) -> ServiceResult<ApiResponse<OrderList>> {
    let status = status_filter(query.status.as_deref())?;
    owned_shop(&state, shop_id, &identity).await?;
    let transactions = db::orders::list_for_shop(&state.pool, shop_id, status).await?;
    Ok(ApiResponse::success(
        "Transactions retrieved",
        OrderList { transactions },
    ))
}

/// GET /api/orders?shop_id=&status=
pub async fn query_orders(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Query(query): Query<OrderQuery>,
) -> ServiceResult<ApiResponse<ShopOrders>> {
    let shop_id = query.shop_id.ok_or_else(|| AppError::required("shop_id"))?;
    let status = status_filter(query.status.as_deref())?;
    owned_shop(&state, shop_id, &identity).await?;
    let orders = db::orders::list_for_shop(&state.pool, shop_id, status).await?;
    Ok(ApiResponse::success("Orders retrieved", ShopOrders { orders }))
}

/// PUT /api/orders/{order_id}/set_price
pub async fn set_price(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(order_id): Path<i64>,
    Json(req): Json<SetPriceRequest>,
) -> ServiceResult<ApiResponse<OrderBody<Order>>> {
    let order = state
        .lifecycle
        .set_price_per_kilo(actor(&identity), order_id, req.price_per_kilo.as_ref())
        .await?;
    Ok(ApiResponse::success(
        "Price set successfully",
        OrderBody { transaction: order },
    ))
}

/// PUT /update_transaction_status/{transaction_id}
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(transaction_id): Path<i64>,
    Json(req): Json<StatusUpdateRequest>,
) -> ServiceResult<ApiResponse<OrderBody<Order>>> {
    let order = state
        .lifecycle
        .update_status(
            actor(&identity),
            transaction_id,
            &req.status,
            req.notes.as_deref(),
        )
        .await?;
    Ok(ApiResponse::success(
        "Status updated successfully",
        OrderBody { transaction: order },
    ))
}

/// PUT /api/orders/{order_id}/decline
pub async fn decline(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(order_id): Path<i64>,
) -> ServiceResult<ApiResponse<OrderBody<Order>>> {
    let order = state.lifecycle.decline(actor(&identity), order_id).await?;
    Ok(ApiResponse::success(
        "Order declined",
        OrderBody { transaction: order },
    ))
}

/// PUT /cancel_transaction/{transaction_id}
pub async fn cancel(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
    Path(transaction_id): Path<i64>,
    Json(req): Json<CancelRequest>,
) -> ServiceResult<ApiResponse<OrderBody<Order>>> {
    let order = state
        .lifecycle
        .cancel(
            actor(&identity),
            transaction_id,
            req.reason.as_deref(),
            req.notes.as_deref(),
        )
        .await?;
    Ok(ApiResponse::success(
        "Transaction cancelled successfully",
        OrderBody { transaction: order },
    ))
}
