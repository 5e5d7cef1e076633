//! Transactions table and the Postgres `OrderStore`

use async_trait::async_trait;
use shared::models::{Notification, NotificationCreate, Order, Shop, User};
use shared::order::OrderStatus;
use shared::util::now_millis;
use sqlx::PgPool;
use sqlx::types::Json;

use super::retry::{RetryPolicy, StoreError};
use super::{notifications, shops, users};
use crate::orders::{NewOrder, OrderStore, StatusChange, TransitionOutcome};

pub async fn find(pool: &PgPool, order_id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM transactions WHERE id = $1")
        .bind(order_id)
        .fetch_optional(pool)
        .await
}

/// A user's orders, newest first
pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM transactions WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// A shop's orders, newest first, optionally narrowed to one status
pub async fn list_for_shop(
    pool: &PgPool,
    shop_id: i64,
    status: Option<OrderStatus>,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM transactions
         WHERE shop_id = $1 AND ($2::order_status IS NULL OR status = $2)
         ORDER BY created_at DESC, id DESC",
    )
    .bind(shop_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

async fn insert(pool: &PgPool, order: &NewOrder, now: i64) -> Result<Order, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO transactions (
            user_id, shop_id, user_name, user_email, user_phone, service_name, items,
            kilo_amount, subtotal, delivery_fee, voucher_discount, total_amount,
            delivery_type, zone, street, barangay, building,
            scheduled_date, scheduled_time, payment_method, notes,
            status, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                 $18, $19, $20, $21, 'Pending', $22, $22)
         RETURNING *",
    )
    .bind(order.user_id)
    .bind(order.shop_id)
    .bind(&order.user_name)
    .bind(&order.user_email)
    .bind(&order.user_phone)
    .bind(&order.service_name)
    .bind(Json(&order.items))
    .bind(order.kilo_amount)
    .bind(order.subtotal)
    .bind(order.delivery_fee)
    .bind(order.voucher_discount)
    .bind(order.total_amount)
    .bind(&order.delivery_type)
    .bind(&order.zone)
    .bind(&order.street)
    .bind(&order.barangay)
    .bind(&order.building)
    .bind(&order.scheduled_date)
    .bind(&order.scheduled_time)
    .bind(&order.payment_method)
    .bind(&order.notes)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Compare-and-swap on status: no row comes back unless the order is still in `expected`
async fn transition(
    pool: &PgPool,
    order_id: i64,
    expected: OrderStatus,
    change: &StatusChange,
    now: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(
        "UPDATE transactions
         SET status = $3,
             price_per_kilo = COALESCE($4, price_per_kilo),
             notes = COALESCE($5, notes),
             updated_at = $6
         WHERE id = $1 AND status = $2
         RETURNING *",
    )
    .bind(order_id)
    .bind(expected)
    .bind(change.status)
    .bind(change.price_per_kilo)
    .bind(&change.notes)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// `OrderStore` over Postgres; every call bounded by the retry policy
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
    policy: RetryPolicy,
}

impl PgOrderStore {
    pub fn new(pool: PgPool, policy: RetryPolicy) -> Self {
        Self { pool, policy }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        self.policy
            .run("find_user", || users::find_by_id(&self.pool, user_id))
            .await
    }

    async fn find_shop(&self, shop_id: i64) -> Result<Option<Shop>, StoreError> {
        self.policy
            .run("find_shop", || shops::find_by_id(&self.pool, shop_id))
            .await
    }

    async fn find_order(&self, order_id: i64) -> Result<Option<Order>, StoreError> {
        self.policy
            .run("find_order", || find(&self.pool, order_id))
            .await
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError> {
        let now = now_millis();
        self.policy
            .single_attempt()
            .run("insert_order", || insert(&self.pool, order, now))
            .await
    }

    async fn transition(
        &self,
        order_id: i64,
        expected: OrderStatus,
        change: &StatusChange,
    ) -> Result<TransitionOutcome, StoreError> {
        let now = now_millis();
        let updated = self
            .policy
            .run("transition", || {
                transition(&self.pool, order_id, expected, change, now)
            })
            .await?;
        Ok(match updated {
            Some(order) => TransitionOutcome::Applied(order),
            None => TransitionOutcome::Stale,
        })
    }

    async fn insert_notification(
        &self,
        notification: &NotificationCreate,
    ) -> Result<Notification, StoreError> {
        let now = now_millis();
        self.policy
            .single_attempt()
            .run("insert_notification", || {
                notifications::insert(&self.pool, notification, now)
            })
            .await
    }
}
