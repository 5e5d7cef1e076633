//! Persistence seam for the lifecycle core

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{Notification, NotificationCreate, Order, OrderItem, Shop, User};
use shared::order::OrderStatus;

use crate::db::retry::StoreError;

/// Order row about to be inserted (id and timestamps assigned by the store)
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: i64,
    pub shop_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub service_name: String,
    pub items: Vec<OrderItem>,
    pub kilo_amount: Decimal,
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub voucher_discount: Decimal,
    pub total_amount: Decimal,
    pub delivery_type: String,
    pub zone: String,
    pub street: String,
    pub barangay: String,
    pub building: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub payment_method: String,
    pub notes: Option<String>,
}

/// Fields written by a status transition; `None` leaves the column as is
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub price_per_kilo: Option<Decimal>,
    pub notes: Option<String>,
}

impl StatusChange {
    pub fn to(status: OrderStatus) -> Self {
        Self {
            status,
            price_per_kilo: None,
            notes: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price_per_kilo = Some(price);
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// Result of a compare-and-swap on order status
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// Row was in the expected status and has been updated
    Applied(Order),
    /// Row no longer holds the expected status (or vanished)
    Stale,
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, StoreError>;

    async fn find_shop(&self, shop_id: i64) -> Result<Option<Shop>, StoreError>;

    async fn find_order(&self, order_id: i64) -> Result<Option<Order>, StoreError>;

    /// Insert a Pending order and return the stored row
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError>;

    /// Apply `change` only if the order is still in `expected`
    async fn transition(
        &self,
        order_id: i64,
        expected: OrderStatus,
        change: &StatusChange,
    ) -> Result<TransitionOutcome, StoreError>;

    async fn insert_notification(
        &self,
        notification: &NotificationCreate,
    ) -> Result<Notification, StoreError>;
}
