//! Shop Model

use super::catalog::{ServiceCreate, ShopService};
use serde::{Deserialize, Serialize};

/// Laundry shop, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: i64,
    pub user_id: i64,
    pub shop_name: String,
    pub contact_number: String,
    pub zone: String,
    pub street: String,
    pub barangay: String,
    pub building: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub created_at: i64,
}

/// Shop with owner info and services (public listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShopWithOwner {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub shop: Shop,
    pub owner_name: String,
    pub owner_email: String,
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub services: Vec<ShopService>,
}

/// Register shop payload
///
/// Required fields are optional here so the handler can name the missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopRegistration {
    pub shop_name: Option<String>,
    pub contact_number: Option<String>,
    pub zone: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub building: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceCreate>,
}

/// Update shop payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopUpdate {
    pub shop_name: Option<String>,
    pub contact_number: Option<String>,
    pub zone: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub building: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
}
