//! Socket frames

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::room::RoomId;
use crate::models::{Notification, Order, OrderItem};
use crate::order::OrderStatus;
use crate::util::format_timestamp;

/// Server → Client event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Reply to a successful join
    RoomJoined { room: RoomId },
    /// Reply to a leave
    RoomLeft { room: RoomId },
    /// A customer placed an order (shop room)
    NewTransaction(TransactionPush),
    /// The customer's own order was created (user room)
    TransactionUpdate(TransactionPush),
    /// Order status changed (shop and user rooms)
    StatusUpdate(StatusPush),
    /// Durable notification was recorded (user room)
    Notification(Notification),
    /// Command rejected; membership unchanged
    Error { message: String },
}

impl ServerEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::RoomJoined { .. } => "room_joined",
            ServerEvent::RoomLeft { .. } => "room_left",
            ServerEvent::NewTransaction(_) => "new_transaction",
            ServerEvent::TransactionUpdate(_) => "transaction_update",
            ServerEvent::StatusUpdate(_) => "status_update",
            ServerEvent::Notification(_) => "notification",
            ServerEvent::Error { .. } => "error",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}

/// Client → Server command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientCommand {
    JoinShopRoom { shop_id: i64 },
    JoinUserRoom { user_id: i64 },
    LeaveRoom { room: RoomId },
}

/// Order summary pushed on creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPush {
    pub transaction_id: i64,
    pub user_id: i64,
    pub shop_id: i64,
    pub service_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    /// `YYYY-MM-DD HH:MM:SS`
    pub created_at: String,
}

impl From<&Order> for TransactionPush {
    fn from(order: &Order) -> Self {
        Self {
            transaction_id: order.id,
            user_id: order.user_id,
            shop_id: order.shop_id,
            service_name: order.service_name.clone(),
            items: order.items.clone(),
            status: order.status,
            total_amount: order.total_amount,
            created_at: format_timestamp(order.created_at),
        }
    }
}

/// Status change pushed to both parties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPush {
    pub transaction_id: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_kilo: Option<Decimal>,
}

impl From<&Order> for StatusPush {
    fn from(order: &Order) -> Self {
        Self {
            transaction_id: order.id,
            status: order.status,
            notes: order.notes.clone(),
            total_amount: order.total_amount,
            price_per_kilo: order.price_per_kilo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_commands_parse() {
        let cmd: ClientCommand =
            serde_json::from_value(json!({"event": "join_shop_room", "data": {"shop_id": 42}}))
                .unwrap();
        assert_eq!(cmd, ClientCommand::JoinShopRoom { shop_id: 42 });

        let cmd: ClientCommand =
            serde_json::from_value(json!({"event": "leave_room", "data": {"room": "user_7"}}))
                .unwrap();
        assert_eq!(
            cmd,
            ClientCommand::LeaveRoom {
                room: RoomId::User(7)
            }
        );
    }

    #[test]
    fn test_unknown_command_rejected() {
        let result = serde_json::from_value::<ClientCommand>(
            json!({"event": "join_everything", "data": {}}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_room_joined_frame() {
        let frame = serde_json::to_value(ServerEvent::RoomJoined {
            room: RoomId::Shop(42),
        })
        .unwrap();
        assert_eq!(frame, json!({"event": "room_joined", "data": {"room": "shop_42"}}));
    }

    #[test]
    fn test_status_update_frame_name_matches_tag() {
        let event = ServerEvent::StatusUpdate(StatusPush {
            transaction_id: 5,
            status: OrderStatus::Completed,
            notes: None,
            total_amount: Decimal::from(110),
            price_per_kilo: None,
        });
        let frame = serde_json::to_value(&event).unwrap();
        assert_eq!(frame["event"], event.name());
        assert_eq!(frame["data"]["status"], "Completed");
        assert_eq!(frame["data"]["total_amount"], 110.0);
    }
}
