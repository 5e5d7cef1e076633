use shared::models::User;
use sqlx::PgPool;

/// Login lookup row (the only place the hash leaves the database)
#[derive(sqlx::FromRow)]
pub struct Credentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_shop_owner: bool,
}

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub zone: Option<&'a str>,
    pub street: Option<&'a str>,
    pub barangay: Option<&'a str>,
    pub building: Option<&'a str>,
}

/// Resolved profile update (name/email already merged with stored values)
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub birthdate: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub zone: Option<&'a str>,
    pub street: Option<&'a str>,
    pub barangay: Option<&'a str>,
    pub building: Option<&'a str>,
}

pub async fn create(pool: &PgPool, user: &NewUser<'_>, now: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, phone, gender, zone, street, barangay, building, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING id",
    )
    .bind(user.name)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.phone)
    .bind(user.gender)
    .bind(user.zone)
    .bind(user.street)
    .bind(user.barangay)
    .bind(user.building)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name, email, phone, birthdate, gender, zone, street, barangay, building, is_shop_owner, created_at
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_credentials_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Credentials>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, password_hash, is_shop_owner FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_credentials_by_id(
    pool: &PgPool,
    user_id: i64,
) -> Result<Option<Credentials>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, password_hash, is_shop_owner FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: i64,
    update: &ProfileUpdate<'_>,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE users SET name = $2, email = $3, phone = $4, birthdate = $5, gender = $6,
                zone = $7, street = $8, barangay = $9, building = $10
         WHERE id = $1",
    )
    .bind(user_id)
    .bind(update.name)
    .bind(update.email)
    .bind(update.phone)
    .bind(update.birthdate)
    .bind(update.gender)
    .bind(update.zone)
    .bind(update.street)
    .bind(update.barangay)
    .bind(update.building)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn update_password(
    pool: &PgPool,
    user_id: i64,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(password_hash)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Cascades to the user's shop, catalog, orders and notifications
pub async fn delete(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
