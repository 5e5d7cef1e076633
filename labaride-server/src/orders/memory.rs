//! In-memory `OrderStore` for lifecycle tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use shared::models::{Notification, NotificationCreate, Order, Shop, User};
use shared::order::OrderStatus;
use shared::util::now_millis;

use super::store::{NewOrder, OrderStore, StatusChange, TransitionOutcome};
use crate::db::retry::StoreError;

#[derive(Default)]
struct State {
    users: HashMap<i64, User>,
    shops: HashMap<i64, Shop>,
    orders: HashMap<i64, Order>,
    notifications: Vec<Notification>,
    next_order_id: i64,
    /// Status a concurrent writer sets right before the next CAS
    interference: Option<(i64, OrderStatus)>,
    fail_notifications: bool,
}

#[derive(Default)]
pub struct MemoryOrderStore {
    state: Mutex<State>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: i64, name: &str) -> User {
        let user = User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: Some("09171234567".to_string()),
            birthdate: None,
            gender: None,
            zone: None,
            street: None,
            barangay: None,
            building: None,
            is_shop_owner: false,
            created_at: now_millis(),
        };
        self.state.lock().unwrap().users.insert(id, user.clone());
        user
    }

    pub fn add_shop(&self, id: i64, owner_id: i64, name: &str) -> Shop {
        let shop = Shop {
            id,
            user_id: owner_id,
            shop_name: name.to_string(),
            contact_number: "09179876543".to_string(),
            zone: "Zone 2".to_string(),
            street: "Mabini St".to_string(),
            barangay: "Poblacion".to_string(),
            building: None,
            opening_time: "08:00".to_string(),
            closing_time: "20:00".to_string(),
            created_at: now_millis(),
        };
        let mut state = self.state.lock().unwrap();
        if let Some(owner) = state.users.get_mut(&owner_id) {
            owner.is_shop_owner = true;
        }
        state.shops.insert(id, shop.clone());
        shop
    }

    pub fn order(&self, id: i64) -> Option<Order> {
        self.state.lock().unwrap().orders.get(&id).cloned()
    }

    /// Put an order straight into `status`, bypassing the state machine
    pub fn set_status(&self, order_id: i64, status: OrderStatus) {
        if let Some(order) = self.state.lock().unwrap().orders.get_mut(&order_id) {
            order.status = status;
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.lock().unwrap().notifications.clone()
    }

    /// Simulate another request moving `order_id` to `status` between our read and our write
    pub fn interfere_before_next_transition(&self, order_id: i64, status: OrderStatus) {
        self.state.lock().unwrap().interference = Some((order_id, status));
    }

    pub fn fail_notification_writes(&self) {
        self.state.lock().unwrap().fail_notifications = true;
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.state.lock().unwrap().users.get(&user_id).cloned())
    }

    async fn find_shop(&self, shop_id: i64) -> Result<Option<Shop>, StoreError> {
        Ok(self.state.lock().unwrap().shops.get(&shop_id).cloned())
    }

    async fn find_order(&self, order_id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.order(order_id))
    }

    async fn insert_order(&self, new: &NewOrder) -> Result<Order, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.next_order_id += 1;
        let now = now_millis();
        let order = Order {
            id: state.next_order_id,
            user_id: new.user_id,
            shop_id: new.shop_id,
            user_name: new.user_name.clone(),
            user_email: new.user_email.clone(),
            user_phone: new.user_phone.clone(),
            service_name: new.service_name.clone(),
            items: new.items.clone(),
            kilo_amount: new.kilo_amount,
            subtotal: new.subtotal,
            delivery_fee: new.delivery_fee,
            voucher_discount: new.voucher_discount,
            total_amount: new.total_amount,
            price_per_kilo: None,
            delivery_type: new.delivery_type.clone(),
            zone: new.zone.clone(),
            street: new.street.clone(),
            barangay: new.barangay.clone(),
            building: new.building.clone(),
            scheduled_date: new.scheduled_date.clone(),
            scheduled_time: new.scheduled_time.clone(),
            payment_method: new.payment_method.clone(),
            notes: new.notes.clone(),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn transition(
        &self,
        order_id: i64,
        expected: OrderStatus,
        change: &StatusChange,
    ) -> Result<TransitionOutcome, StoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some((id, status)) = state.interference.take() {
            if let Some(order) = state.orders.get_mut(&id) {
                order.status = status;
            }
        }

        let Some(order) = state.orders.get_mut(&order_id) else {
            return Ok(TransitionOutcome::Stale);
        };
        if order.status != expected {
            return Ok(TransitionOutcome::Stale);
        }
        order.status = change.status;
        if let Some(price) = change.price_per_kilo {
            order.price_per_kilo = Some(price);
        }
        if let Some(notes) = &change.notes {
            order.notes = Some(notes.clone());
        }
        order.updated_at = now_millis();
        Ok(TransitionOutcome::Applied(order.clone()))
    }

    async fn insert_notification(
        &self,
        create: &NotificationCreate,
    ) -> Result<Notification, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_notifications {
            return Err(StoreError::Timeout);
        }
        let notification = Notification {
            id: state.notifications.len() as i64 + 1,
            user_id: create.user_id,
            message: create.message.clone(),
            from_name: create.from_name.clone(),
            is_read: false,
            created_at: now_millis(),
        };
        state.notifications.push(notification.clone());
        Ok(notification)
    }
}
