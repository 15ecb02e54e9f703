//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    future,
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ChatMessage, ReadError, RoomId, Username},
    infrastructure::dto::websocket::{InboundMessage, OutboundMessage},
    ui::state::AppState,
    usecase::RelayError,
};

/// How long the pusher task may take to flush and close after the relay ends.
const PUSHER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Query parameters for WebSocket connection
///
/// Both are optional and default to the empty string.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub username: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let room_id = RoomId::from(query.room);
    let username = Username::from(query.username);

    // A failed upgrade only loses this connection attempt.
    ws.on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state, room_id, username))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId, username: Username) {
    let (sender, receiver) = socket.split();
    // unbounded: a stalled reader grows this queue instead of blocking fan-out
    let (tx, rx) = mpsc::unbounded_channel();

    let mut send_task = pusher_loop(rx, sender);

    let inbound = receiver.filter_map(|frame| future::ready(read_frame(frame)));
    let result = state
        .relay_connection_usecase
        .execute(room_id.clone(), username.clone(), tx, inbound)
        .await;

    match result {
        Ok(()) => tracing::info!("Client '{}' closed its connection to '{}'", username, room_id),
        Err(RelayError::Read(e)) => {
            tracing::warn!("Connection of '{}' in '{}' failed: {}", username, room_id, e)
        }
        Err(e) => tracing::error!("Relay for '{}' in '{}' stopped: {}", username, room_id, e),
    }

    // The room dropped our channel on leave; let the pusher flush and close.
    if tokio::time::timeout(PUSHER_DRAIN_TIMEOUT, &mut send_task)
        .await
        .is_err()
    {
        send_task.abort();
    }
}

/// Map one WebSocket frame to the relay's inbound item.
///
/// Returns `None` for frames that carry no chat message.
fn read_frame(frame: Result<Message, axum::Error>) -> Option<Result<String, ReadError>> {
    match frame {
        Ok(Message::Text(text)) => Some(Ok(InboundMessage::from_frame(text.as_str()).text)),
        Ok(Message::Close(_)) => Some(Err(ReadError::Closed)),
        Ok(Message::Binary(data)) => {
            tracing::debug!("Ignoring binary frame ({} bytes)", data.len());
            None
        }
        // Ping/pong is handled automatically by the WebSocket protocol
        Ok(_) => None,
        Err(e) => Some(Err(ReadError::Transport(e.to_string()))),
    }
}

/// Spawns a task that drains the connection's outbound channel into the socket.
///
/// Ends when a write fails, which drops the receiver so the room removes
/// this member on its next fan-out, or when the room closes the channel, in
/// which case a Close frame is sent first.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Arc<ChatMessage>>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match serde_json::to_string(&OutboundMessage::from(message.as_ref())) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode outbound message: {}", e);
                    continue;
                }
            };
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::warn!("Write to client failed: {}", e);
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}
