//! Order (Transaction) Model

use super::shop::Shop;
use crate::order::OrderStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Line item attached to an order (household items, clothing types)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(alias = "name", alias = "type_name")]
    pub item_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub price: Option<Decimal>,
}

fn default_quantity() -> i32 {
    1
}

/// Order entity (a single laundry service request)
///
/// `user_name`/`user_email`/`user_phone` are a snapshot of the customer at
/// creation time; `user_id` and `shop_id` never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub shop_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub service_name: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<OrderItem>,
    pub kilo_amount: Decimal,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub voucher_discount: Decimal,
    pub total_amount: Decimal,
    /// Set once by the shop while the order is Pending
    pub price_per_kilo: Option<Decimal>,
    pub delivery_type: String,
    pub zone: String,
    pub street: String,
    pub barangay: String,
    pub building: String,
    /// `YYYY-MM-DD`
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order with its shop (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithShop {
    #[serde(flatten)]
    pub order: Order,
    pub shop: Option<Shop>,
}

/// Create order payload as received from clients
///
/// Monetary fields are raw JSON values: mobile clients send numbers or
/// numeric strings, and validation reports the offending field by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreateRequest {
    pub shop_id: Option<Value>,
    pub service_name: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub kilo_amount: Option<Value>,
    pub subtotal: Option<Value>,
    pub delivery_fee: Option<Value>,
    pub voucher_discount: Option<Value>,
    pub total_amount: Option<Value>,
    pub delivery_type: Option<String>,
    pub zone: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub building: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Set price-per-kilo payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetPriceRequest {
    pub price_per_kilo: Option<Value>,
}

/// General status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// Cancellation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
    pub notes: Option<String>,
}

/// Shop order listing filter (`/api/orders?shop_id=&status=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub shop_id: Option<i64>,
    pub status: Option<String>,
}
