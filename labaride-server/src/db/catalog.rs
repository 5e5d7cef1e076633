use rust_decimal::Decimal;
use shared::models::{ClothingType, HouseholdItem, KiloPrice, KiloPriceCreate, ShopService};
use sqlx::PgPool;

// ── Services ──

pub async fn services_for_shop(pool: &PgPool, shop_id: i64) -> Result<Vec<ShopService>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM shop_services WHERE shop_id = $1 ORDER BY id")
        .bind(shop_id)
        .fetch_all(pool)
        .await
}

pub async fn services_for_shops(
    pool: &PgPool,
    shop_ids: &[i64],
) -> Result<Vec<ShopService>, sqlx::Error> {
    if shop_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as("SELECT * FROM shop_services WHERE shop_id = ANY($1) ORDER BY id")
        .bind(shop_ids)
        .fetch_all(pool)
        .await
}

/// Every active service across shops, by name
pub async fn active_services(pool: &PgPool) -> Result<Vec<ShopService>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM shop_services WHERE is_active ORDER BY service_name")
        .fetch_all(pool)
        .await
}

pub async fn find_service(pool: &PgPool, service_id: i64) -> Result<Option<ShopService>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM shop_services WHERE id = $1")
        .bind(service_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_service(
    pool: &PgPool,
    shop_id: i64,
    service_name: &str,
    color: Option<&str>,
    price: Decimal,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO shop_services (shop_id, service_name, color, price) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(shop_id)
    .bind(service_name)
    .bind(color)
    .bind(price)
    .fetch_one(pool)
    .await
}

pub async fn update_service(
    pool: &PgPool,
    service_id: i64,
    service_name: &str,
    price: Decimal,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE shop_services SET service_name = $1, price = $2 WHERE id = $3")
        .bind(service_name)
        .bind(price)
        .bind(service_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_service(pool: &PgPool, service_id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM shop_services WHERE id = $1")
        .bind(service_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Household items ──

pub async fn household_items(pool: &PgPool, shop_id: i64) -> Result<Vec<HouseholdItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM household_items WHERE shop_id = $1 ORDER BY id")
        .bind(shop_id)
        .fetch_all(pool)
        .await
}

pub async fn all_household_items(pool: &PgPool) -> Result<Vec<HouseholdItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM household_items ORDER BY item_name")
        .fetch_all(pool)
        .await
}

pub async fn find_household_item(pool: &PgPool, item_id: i64) -> Result<Option<HouseholdItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM household_items WHERE id = $1")
        .bind(item_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_household_item_by_name(
    pool: &PgPool,
    shop_id: i64,
    item_name: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM household_items WHERE shop_id = $1 AND item_name = $2")
        .bind(shop_id)
        .bind(item_name)
        .fetch_optional(pool)
        .await
}

pub async fn create_household_item(
    pool: &PgPool,
    shop_id: i64,
    item_name: &str,
    price: Decimal,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO household_items (shop_id, item_name, price) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(shop_id)
    .bind(item_name)
    .bind(price)
    .fetch_one(pool)
    .await
}

pub async fn update_household_price(pool: &PgPool, item_id: i64, price: Decimal) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE household_items SET price = $1 WHERE id = $2")
        .bind(price)
        .bind(item_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Clothing types ──

pub async fn clothing_types(pool: &PgPool, shop_id: i64) -> Result<Vec<ClothingType>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM clothing_types WHERE shop_id = $1 ORDER BY id")
        .bind(shop_id)
        .fetch_all(pool)
        .await
}

pub async fn find_clothing_type(pool: &PgPool, type_id: i64) -> Result<Option<ClothingType>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM clothing_types WHERE id = $1")
        .bind(type_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_clothing_type_by_name(
    pool: &PgPool,
    shop_id: i64,
    type_name: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM clothing_types WHERE shop_id = $1 AND type_name = $2")
        .bind(shop_id)
        .bind(type_name)
        .fetch_optional(pool)
        .await
}

pub async fn create_clothing_type(
    pool: &PgPool,
    shop_id: i64,
    type_name: &str,
    price: Decimal,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO clothing_types (shop_id, type_name, price) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(shop_id)
    .bind(type_name)
    .bind(price)
    .fetch_one(pool)
    .await
}

pub async fn update_clothing_price(pool: &PgPool, type_id: i64, price: Decimal) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE clothing_types SET price = $1 WHERE id = $2")
        .bind(price)
        .bind(type_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Kilo prices ──

pub async fn kilo_prices(pool: &PgPool, shop_id: i64) -> Result<Vec<KiloPrice>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM kilo_prices WHERE shop_id = $1 ORDER BY min_kilo")
        .bind(shop_id)
        .fetch_all(pool)
        .await
}

pub async fn create_kilo_price(
    pool: &PgPool,
    shop_id: i64,
    price: &KiloPriceCreate,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO kilo_prices (shop_id, min_kilo, max_kilo, price_per_kilo) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(shop_id)
    .bind(price.min_kilo)
    .bind(price.max_kilo)
    .bind(price.price_per_kilo)
    .fetch_one(pool)
    .await
}

pub async fn delete_kilo_price(
    pool: &PgPool,
    shop_id: i64,
    min_kilo: Decimal,
    max_kilo: Decimal,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM kilo_prices WHERE shop_id = $1 AND min_kilo = $2 AND max_kilo = $3")
        .bind(shop_id)
        .bind(min_kilo)
        .bind(max_kilo)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
