use super::*;
use crate::live::RoomHub;
use crate::orders::memory::MemoryOrderStore;
use rust_decimal::Decimal;
use serde_json::json;
use shared::order::InvalidTransition;
use shared::realtime::{RoomId, ServerEvent};
use tokio::sync::mpsc;

/// Customer placing the orders
const CUSTOMER: i64 = 5;
/// Owner of `SHOP`
const OWNER: i64 = 3;
const SHOP: i64 = 42;
/// Unrelated user (also the `user_7` room)
const BYSTANDER: i64 = 7;

struct Harness {
    store: Arc<MemoryOrderStore>,
    hub: RoomHub,
    lifecycle: OrderLifecycle,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryOrderStore::new());
    store.add_user(CUSTOMER, "Ana");
    store.add_user(OWNER, "Ben");
    store.add_user(BYSTANDER, "Cora");
    store.add_shop(SHOP, OWNER, "Suds & Co");

    let hub = RoomHub::new();
    let lifecycle = OrderLifecycle::new(store.clone(), Fanout::new(hub.clone()));
    Harness {
        store,
        hub,
        lifecycle,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn create_request() -> OrderCreateRequest {
    serde_json::from_value(json!({
        "shop_id": SHOP,
        "service_name": "Wash & Fold",
        "items": [{"item_name": "Blanket", "quantity": 2}],
        "kilo_amount": "4.5",
        "subtotal": 100,
        "delivery_fee": 20,
        "voucher_discount": 10,
        "total_amount": 110,
        "delivery_type": "Pickup & Delivery",
        "zone": "Zone 1",
        "street": "Rizal St",
        "barangay": "San Isidro",
        "building": "Unit 4",
        "scheduled_date": "2026-10-20",
        "scheduled_time": "09:00",
    }))
    .unwrap()
}

async fn place_order(h: &Harness) -> Order {
    h.lifecycle
        .create(Actor::new(CUSTOMER), CUSTOMER, &create_request())
        .await
        .unwrap()
}

async fn processing_order(h: &Harness) -> Order {
    let order = place_order(h).await;
    h.lifecycle
        .set_price_per_kilo(Actor::new(OWNER), order.id, Some(&json!(35)))
        .await
        .unwrap()
}

fn drain(rx: &mut mpsc::Receiver<ServerEvent>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn names(events: &[ServerEvent]) -> Vec<&'static str> {
    events.iter().map(ServerEvent::name).collect()
}

mod test_core;
