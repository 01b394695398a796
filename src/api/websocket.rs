//! WebSocket handler for the realtime channel.
//!
//! Clients send `{"event":"subscribe","data":"<asset id>"}` to join the room
//! named after that asset. Closing the socket leaves every room. The server
//! sends nothing on its own.

use crate::rooms::ConnectionId;
use crate::state::AppState;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Events a client may send.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ClientEvent {
    /// Join the room named after an asset id.
    Subscribe(String),
}

/// WebSocket upgrade handler.
#[utoipa::path(
    get,
    path = "/ws",
    responses(
        (status = 101, description = "WebSocket connection established")
    ),
    tag = "WebSocket"
)]
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let conn = Uuid::new_v4();

    info!(%conn, "WebSocket client connected");

    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Text(text)) => handle_client_message(text.as_str(), conn, &state),
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                error!(%conn, "WebSocket error: {}", e);
                break;
            }
        }
    }

    let left = state.rooms.leave_all(conn);
    info!(%conn, rooms = left, "WebSocket client disconnected");
}

/// Handle an incoming client message.
fn handle_client_message(text: &str, conn: ConnectionId, state: &AppState) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::Subscribe(asset)) => {
            state.rooms.join(&asset, conn);
            debug!(%conn, room = %asset, "Client joined room");
        }
        Err(e) => {
            debug!(%conn, "Ignoring unknown message {}: {}", text, e);
        }
    }
}
