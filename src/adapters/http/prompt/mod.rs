//! HTTP adapter for the prompt endpoint and WebSocket relay.

pub mod dto;
pub mod handlers;
pub mod routes;
pub mod websocket;

pub use dto::{ErrorResponse, PromptRequest, PromptResponse, RelayReply};
pub use handlers::{send_prompt, PromptApiError, PromptAppState};
pub use routes::{prompt_router, prompt_routes, relay_routes};
pub use websocket::{relay_message, relay_ws_handler};
