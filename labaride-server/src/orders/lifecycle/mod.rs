//! OrderLifecycle: validates and executes order transitions
//!
//! Every transition is a compare-and-swap on the status the order was read
//! in. A concurrent writer that got there first turns the call into
//! `OrderError::Conflict` instead of silently overwriting its result.

use std::sync::Arc;

use serde_json::Value;
use shared::models::{Order, OrderCreateRequest, Shop};
use shared::order::OrderStatus;

use super::error::OrderError;
use super::input::{OrderDraft, cancel_note, parse_price_per_kilo, parse_status};
use super::store::{OrderStore, StatusChange, TransitionOutcome};
use crate::live::{Fanout, LifecycleEvent};

/// Authenticated caller of a lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
}

impl Actor {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

#[derive(Clone)]
pub struct OrderLifecycle {
    store: Arc<dyn OrderStore>,
    fanout: Fanout,
}

impl OrderLifecycle {
    pub fn new(store: Arc<dyn OrderStore>, fanout: Fanout) -> Self {
        Self { store, fanout }
    }

    /// Create a Pending order for `user_id`
    pub async fn create(
        &self,
        actor: Actor,
        user_id: i64,
        req: &OrderCreateRequest,
    ) -> Result<Order, OrderError> {
        if actor.user_id != user_id {
            return Err(OrderError::Forbidden("Cannot place orders for another user"));
        }

        let draft = OrderDraft::parse(req)?;
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or(OrderError::UserNotFound(user_id))?;
        let shop_id = draft.shop_id;
        self.store
            .find_shop(shop_id)
            .await?
            .ok_or(OrderError::ShopNotFound(shop_id))?;

        let order = self.store.insert_order(&draft.into_new_order(&user)).await?;
        tracing::info!(
            order_id = order.id,
            user_id,
            shop_id,
            total = %order.total_amount,
            "Order created"
        );

        self.publish(LifecycleEvent::Created(order.clone())).await?;
        Ok(order)
    }

    /// Shop sets the per-kilo price: Pending → Processing, notifies the customer
    pub async fn set_price_per_kilo(
        &self,
        actor: Actor,
        order_id: i64,
        price: Option<&Value>,
    ) -> Result<Order, OrderError> {
        let price = parse_price_per_kilo(price)?;
        let (order, shop) = self.load_as_shop_owner(actor, order_id).await?;
        let next = order.status.transition(OrderStatus::Processing)?;

        let updated = self
            .apply(&order, StatusChange::to(next).with_price(price))
            .await?;
        self.publish(LifecycleEvent::PriceSet {
            order: updated.clone(),
            shop_name: shop.shop_name,
            price,
        })
        .await?;
        Ok(updated)
    }

    /// Shop moves the order along any edge of the state machine
    pub async fn update_status(
        &self,
        actor: Actor,
        order_id: i64,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Order, OrderError> {
        let requested = parse_status(status)?;
        let (order, _) = self.load_as_shop_owner(actor, order_id).await?;
        let next = order.status.transition(requested)?;

        let notes = notes.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
        let updated = self
            .apply(&order, StatusChange::to(next).with_notes(notes))
            .await?;
        self.publish(LifecycleEvent::StatusChanged(updated.clone()))
            .await?;
        Ok(updated)
    }

    /// Shop refuses a Pending order
    pub async fn decline(&self, actor: Actor, order_id: i64) -> Result<Order, OrderError> {
        let (order, _) = self.load_as_shop_owner(actor, order_id).await?;
        let next = order.status.transition(OrderStatus::Declined)?;

        let updated = self.apply(&order, StatusChange::to(next)).await?;
        self.publish(LifecycleEvent::StatusChanged(updated.clone()))
            .await?;
        Ok(updated)
    }

    /// Customer or shop cancels a Pending/Processing order with a reason
    pub async fn cancel(
        &self,
        actor: Actor,
        order_id: i64,
        reason: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Order, OrderError> {
        let note = cancel_note(reason, notes)?;
        let order = self.load(order_id).await?;
        if actor.user_id != order.user_id {
            let shop = self.load_shop(order.shop_id).await?;
            if actor.user_id != shop.user_id {
                return Err(OrderError::Forbidden(
                    "Only the customer or the shop can cancel this order",
                ));
            }
        }
        let next = order.status.transition(OrderStatus::Cancelled)?;

        let updated = self
            .apply(&order, StatusChange::to(next).with_notes(Some(note)))
            .await?;
        self.publish(LifecycleEvent::StatusChanged(updated.clone()))
            .await?;
        Ok(updated)
    }

    async fn load(&self, order_id: i64) -> Result<Order, OrderError> {
        self.store
            .find_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))
    }

    async fn load_shop(&self, shop_id: i64) -> Result<Shop, OrderError> {
        self.store
            .find_shop(shop_id)
            .await?
            .ok_or(OrderError::ShopNotFound(shop_id))
    }

    async fn load_as_shop_owner(
        &self,
        actor: Actor,
        order_id: i64,
    ) -> Result<(Order, Shop), OrderError> {
        let order = self.load(order_id).await?;
        let shop = self.load_shop(order.shop_id).await?;
        if shop.user_id != actor.user_id {
            return Err(OrderError::Forbidden("Only the shop owner can manage this order"));
        }
        Ok((order, shop))
    }

    /// CAS from the status `order` was read in
    async fn apply(&self, order: &Order, change: StatusChange) -> Result<Order, OrderError> {
        match self.store.transition(order.id, order.status, &change).await? {
            TransitionOutcome::Applied(updated) => {
                tracing::info!(
                    order_id = order.id,
                    from = %order.status,
                    to = %updated.status,
                    "Order transitioned"
                );
                Ok(updated)
            }
            TransitionOutcome::Stale => {
                tracing::warn!(
                    order_id = order.id,
                    expected = %order.status,
                    to = %change.status,
                    "Order changed concurrently, transition rejected"
                );
                Err(OrderError::Conflict(order.id))
            }
        }
    }

    async fn publish(&self, event: LifecycleEvent) -> Result<(), OrderError> {
        self.fanout.dispatch(self.store.as_ref(), &event).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
