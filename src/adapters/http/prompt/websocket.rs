//! WebSocket relay for the prompt endpoint.
//!
//! Each text frame carries `{ userId, prompt }` and is answered with
//! `{ botResponse }`. Frames are handled on their own task so a slow provider
//! call does not block later messages on the same socket.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::application::SendPromptHandler;

use super::dto::{PromptRequest, RelayReply};
use super::handlers::PromptAppState;

// ════════════════════════════════════════════════════════════════════════════════
// WebSocket Upgrade Handler
// ════════════════════════════════════════════════════════════════════════════════

/// Upgrades the connection to a prompt relay socket.
///
/// Route: `GET /` and `GET /ws`
pub async fn relay_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<PromptAppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_relay_socket(socket, state.handler))
}

// ════════════════════════════════════════════════════════════════════════════════
// WebSocket Connection Handler
// ════════════════════════════════════════════════════════════════════════════════

async fn handle_relay_socket(socket: WebSocket, handler: Arc<SendPromptHandler>) {
    let connection_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    tracing::info!(connection_id = %connection_id, "Relay connection opened");

    // Single writer; per-message tasks reply through the channel
    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let handler = Arc::clone(&handler);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reply = relay_message(&handler, &text).await;
                    match serde_json::to_string(&reply) {
                        Ok(json) => {
                            // Receiver is gone once the socket closed
                            let _ = tx.send(Message::Text(json));
                        }
                        Err(e) => tracing::error!(error = %e, "Failed to serialize relay reply"),
                    }
                });
            }
            Ok(Message::Ping(data)) => {
                if tx.send(Message::Pong(data)).is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                tracing::debug!(connection_id = %connection_id, "Client closed connection");
                break;
            }
            Ok(_) => {} // Binary and pong frames are ignored
            Err(e) => {
                tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    writer.abort();

    tracing::info!(connection_id = %connection_id, "Relay connection closed");
}

// ════════════════════════════════════════════════════════════════════════════════
// Message Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Runs one relay frame through the prompt handler.
///
/// Never fails: every error is logged and collapsed into
/// [`RelayReply::error`].
pub async fn relay_message(handler: &SendPromptHandler, text: &str) -> RelayReply {
    let request = match serde_json::from_str::<PromptRequest>(text) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse relay message");
            return RelayReply::error();
        }
    };

    let command = match request.into_command() {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected relay message");
            return RelayReply::error();
        }
    };

    match handler.handle(command).await {
        Ok(result) => RelayReply::new(result.bot_response),
        Err(e) => {
            tracing::error!(error = %e, "Relay prompt failed");
            RelayReply::error()
        }
    }
}
