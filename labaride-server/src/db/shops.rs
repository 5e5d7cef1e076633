use std::collections::HashMap;

use shared::models::{ServiceCreate, Shop, ShopUpdate, ShopWithOwner};
use sqlx::PgPool;

use super::catalog;

#[derive(Debug)]
pub struct NewShop<'a> {
    pub shop_name: &'a str,
    pub contact_number: &'a str,
    pub zone: &'a str,
    pub street: &'a str,
    pub barangay: &'a str,
    pub building: Option<&'a str>,
    pub opening_time: &'a str,
    pub closing_time: &'a str,
}

/// Insert the shop and its initial services, and flag the owner, in one transaction
pub async fn create_with_services(
    pool: &PgPool,
    user_id: i64,
    shop: &NewShop<'_>,
    services: &[ServiceCreate],
    now: i64,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let shop_id: i64 = sqlx::query_scalar(
        "INSERT INTO shops (user_id, shop_name, contact_number, zone, street, barangay, building, opening_time, closing_time, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING id",
    )
    .bind(user_id)
    .bind(shop.shop_name)
    .bind(shop.contact_number)
    .bind(shop.zone)
    .bind(shop.street)
    .bind(shop.barangay)
    .bind(shop.building)
    .bind(shop.opening_time)
    .bind(shop.closing_time)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for service in services {
        sqlx::query(
            "INSERT INTO shop_services (shop_id, service_name, color, price) VALUES ($1, $2, $3, $4)",
        )
        .bind(shop_id)
        .bind(&service.service_name)
        .bind(&service.color)
        .bind(service.price)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE users SET is_shop_owner = TRUE WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(shop_id)
}

pub async fn find_by_id(pool: &PgPool, shop_id: i64) -> Result<Option<Shop>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM shops WHERE id = $1")
        .bind(shop_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_owner(pool: &PgPool, user_id: i64) -> Result<Option<Shop>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM shops WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Newest first; `limit = None` returns every shop
pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Shop>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM shops ORDER BY created_at DESC LIMIT $1")
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// All shops with owner name/email and their services
pub async fn list_with_owners(pool: &PgPool) -> Result<Vec<ShopWithOwner>, sqlx::Error> {
    let mut shops: Vec<ShopWithOwner> = sqlx::query_as(
        "SELECT s.*, u.name AS owner_name, u.email AS owner_email
         FROM shops s JOIN users u ON u.id = s.user_id
         ORDER BY s.created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = shops.iter().map(|s| s.shop.id).collect();
    let mut by_shop: HashMap<i64, Vec<_>> = HashMap::new();
    for service in catalog::services_for_shops(pool, &ids).await? {
        by_shop.entry(service.shop_id).or_default().push(service);
    }
    for shop in &mut shops {
        shop.services = by_shop.remove(&shop.shop.id).unwrap_or_default();
    }
    Ok(shops)
}

/// Partial update; omitted fields keep their stored values
pub async fn update(
    pool: &PgPool,
    shop_id: i64,
    update: &ShopUpdate,
) -> Result<Option<Shop>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE shops SET
            shop_name = COALESCE($2, shop_name),
            contact_number = COALESCE($3, contact_number),
            zone = COALESCE($4, zone),
            street = COALESCE($5, street),
            barangay = COALESCE($6, barangay),
            building = COALESCE($7, building),
            opening_time = COALESCE($8, opening_time),
            closing_time = COALESCE($9, closing_time)
         WHERE id = $1
         RETURNING *",
    )
    .bind(shop_id)
    .bind(&update.shop_name)
    .bind(&update.contact_number)
    .bind(&update.zone)
    .bind(&update.street)
    .bind(&update.barangay)
    .bind(&update.building)
    .bind(&update.opening_time)
    .bind(&update.closing_time)
    .fetch_optional(pool)
    .await
}
