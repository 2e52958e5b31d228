//! Axum routes for the prompt endpoint and its WebSocket relay.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{send_prompt, PromptAppState};
use super::websocket::relay_ws_handler;

/// Creates routes for the prompt endpoint.
///
/// - POST /prompt - Send a prompt, get the reply
pub fn prompt_routes() -> Router<PromptAppState> {
    Router::new().route("/prompt", post(send_prompt))
}

/// Prompt routes nested under /api.
pub fn prompt_router() -> Router<PromptAppState> {
    Router::new().nest("/api", prompt_routes())
}

/// WebSocket relay routes.
///
/// - WS / - Relay socket at the server root
/// - WS /ws - Same socket at an explicit path
pub fn relay_routes() -> Router<PromptAppState> {
    Router::new()
        .route("/", get(relay_ws_handler))
        .route("/ws", get(relay_ws_handler))
}
