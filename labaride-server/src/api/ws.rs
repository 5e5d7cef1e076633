//! Realtime WebSocket endpoint
//!
//! GET /ws?token=<JWT>
//! Auth: JWT via query parameter (browser WebSockets cannot set headers)
//!
//! Protocol (JSON frames `{"event": .., "data": ..}`):
//! - Client → Server: ClientCommand (join_shop_room, join_user_room, leave_room)
//! - Server → Client: ServerEvent (room_joined, room_left, new_transaction,
//!   transaction_update, status_update, notification, error)

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use shared::error::AppError;
use shared::realtime::{ClientCommand, RoomId, ServerEvent};
use tokio::time::Duration;

use crate::auth;
use crate::db;
use crate::live::{RoomHub, Session};
use crate::state::AppState;

const PING_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
pub struct WsAuthQuery {
    token: Option<String>,
}

/// GET /ws?token=<JWT>
pub async fn handle_ws(
    State(state): State<AppState>,
    Query(query): Query<WsAuthQuery>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, AppError> {
    let token = query.token.ok_or_else(AppError::not_authenticated)?;
    let identity = auth::verify_token(&token, &state.jwt_secret)?;

    Ok(ws.on_upgrade(move |socket| ws_session(socket, state, identity.user_id)))
}

async fn ws_session(socket: WebSocket, state: AppState, user_id: i64) {
    let (mut sink, mut stream) = socket.split();
    let (mut session, mut outbound) = state.rooms.open_session(user_id, state.ws_session_buffer);

    tracing::info!(user_id, session = session.id(), "Realtime socket connected");

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = outbound.recv() => {
                let Some(event) = event else { break };
                if send_event(&mut sink, &event).await.is_err() {
                    break;
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientCommand>(&text) {
                            Ok(cmd) => handle_command(&state, &mut session, cmd).await,
                            Err(e) => {
                                tracing::debug!(session = session.id(), "Unparseable command: {e}");
                                session.send_direct(ServerEvent::error("Unknown command"));
                            }
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    tracing::info!(
        user_id,
        session = session.id(),
        rooms = session.rooms().len(),
        "Realtime socket disconnected"
    );
    state.rooms.close(session);
}

async fn send_event(
    sink: &mut futures::stream::SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(event = event.name(), "Failed to encode event: {e}");
            return Ok(());
        }
    };
    sink.send(Message::Text(text.into())).await
}

async fn handle_command(state: &AppState, session: &mut Session, cmd: ClientCommand) {
    let reply = match cmd {
        ClientCommand::JoinUserRoom { user_id } => {
            join_room(&state.rooms, session, RoomId::User(user_id), None)
        }
        ClientCommand::JoinShopRoom { shop_id } => {
            match db::shops::find_by_id(&state.pool, shop_id).await {
                Ok(shop) => join_room(
                    &state.rooms,
                    session,
                    RoomId::Shop(shop_id),
                    shop.map(|s| s.user_id),
                ),
                Err(e) => {
                    tracing::error!(shop_id, "Shop lookup failed during join: {e}");
                    ServerEvent::error("Could not verify shop ownership")
                }
            }
        }
        ClientCommand::LeaveRoom { room } => {
            state.rooms.leave(session, room);
            ServerEvent::RoomLeft { room }
        }
    };
    session.send_direct(reply);
}

/// Who may listen where: own user room only; shop room only for its owner
fn authorize_join(user_id: i64, room: RoomId, shop_owner: Option<i64>) -> Result<(), &'static str> {
    match room {
        RoomId::User(id) if id == user_id => Ok(()),
        RoomId::User(_) => Err("Cannot join another user's room"),
        RoomId::Shop(_) => match shop_owner {
            Some(owner) if owner == user_id => Ok(()),
            Some(_) => Err("Only the shop owner can join this room"),
            None => Err("Shop not found"),
        },
    }
}

/// Join if authorized; the reply is `room_joined` or an `error` with membership unchanged
fn join_room(hub: &RoomHub, session: &mut Session, room: RoomId, shop_owner: Option<i64>) -> ServerEvent {
    match authorize_join(session.user_id(), room, shop_owner) {
        Ok(()) => {
            hub.join(session, room);
            ServerEvent::RoomJoined { room }
        }
        Err(message) => {
            tracing::warn!(user_id = session.user_id(), room = %room, "Room join denied");
            ServerEvent::error(message)
        }
    }
}
