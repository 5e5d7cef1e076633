//! Notification fan-out
//!
//! Turns a lifecycle event into (a) an optional durable notification and
//! (b) a list of room pushes. The durable write is awaited and its failure
//! propagates; room pushes are fire-and-forget.

use rust_decimal::Decimal;
use shared::models::{NotificationCreate, Order};
use shared::realtime::{RoomId, ServerEvent, StatusPush, TransactionPush};

use super::RoomHub;
use crate::db::retry::StoreError;
use crate::orders::OrderStore;

/// Outcome of a persisted lifecycle transition
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    Created(Order),
    PriceSet {
        order: Order,
        shop_name: String,
        price: Decimal,
    },
    StatusChanged(Order),
}

/// What one lifecycle event implies
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub notification: Option<NotificationCreate>,
    pub pushes: Vec<(RoomId, ServerEvent)>,
}

impl LifecycleEvent {
    pub fn order(&self) -> &Order {
        match self {
            LifecycleEvent::Created(order)
            | LifecycleEvent::PriceSet { order, .. }
            | LifecycleEvent::StatusChanged(order) => order,
        }
    }

    /// Rooms, events and durable notification for this event
    pub fn plan(&self) -> Delivery {
        let order = self.order();
        let shop_room = RoomId::Shop(order.shop_id);
        let user_room = RoomId::User(order.user_id);

        match self {
            LifecycleEvent::Created(order) => {
                let push = TransactionPush::from(order);
                Delivery {
                    notification: None,
                    pushes: vec![
                        (shop_room, ServerEvent::NewTransaction(push.clone())),
                        (user_room, ServerEvent::TransactionUpdate(push)),
                    ],
                }
            }
            LifecycleEvent::PriceSet {
                order,
                shop_name,
                price,
            } => Delivery {
                notification: Some(NotificationCreate {
                    user_id: order.user_id,
                    message: price_set_message(*price),
                    from_name: shop_name.clone(),
                }),
                pushes: status_pushes(order),
            },
            LifecycleEvent::StatusChanged(order) => Delivery {
                notification: None,
                pushes: status_pushes(order),
            },
        }
    }
}

pub fn price_set_message(price: Decimal) -> String {
    format!("The shop set the price per kilo to ₱{price} for your order.")
}

fn status_pushes(order: &Order) -> Vec<(RoomId, ServerEvent)> {
    let push = StatusPush::from(order);
    vec![
        (RoomId::Shop(order.shop_id), ServerEvent::StatusUpdate(push.clone())),
        (RoomId::User(order.user_id), ServerEvent::StatusUpdate(push)),
    ]
}

/// Delivers lifecycle events through the durable and realtime channels
#[derive(Clone)]
pub struct Fanout {
    rooms: RoomHub,
}

impl Fanout {
    pub fn new(rooms: RoomHub) -> Self {
        Self { rooms }
    }

    /// Write the durable notification (if any), then push to rooms.
    ///
    /// Returns the number of session deliveries; zero subscribers is not an error.
    pub async fn dispatch(
        &self,
        store: &dyn OrderStore,
        event: &LifecycleEvent,
    ) -> Result<usize, StoreError> {
        let Delivery {
            notification,
            mut pushes,
        } = event.plan();

        if let Some(notification) = notification {
            let stored = store.insert_notification(&notification).await?;
            tracing::info!(
                notification_id = stored.id,
                user_id = stored.user_id,
                "Notification recorded"
            );
            pushes.push((RoomId::User(stored.user_id), ServerEvent::Notification(stored)));
        }

        let mut delivered = 0;
        for (room, push) in &pushes {
            let n = self.rooms.emit(*room, push);
            tracing::debug!(room = %room, event = push.name(), delivered = n, "Room push");
            delivered += n;
        }
        Ok(delivered)
    }
}
