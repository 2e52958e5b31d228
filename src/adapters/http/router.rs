//! Top-level router assembly.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health::health;
use super::middleware::{origin_guard, OriginAllowlist};
use super::prompt::{prompt_router, relay_routes, PromptAppState};

/// Builds the full application router.
///
/// - `/api/*` behind the origin guard
/// - `/` and `/ws` WebSocket relay
/// - `/health`
pub fn app_router(state: PromptAppState, allowlist: OriginAllowlist) -> Router {
    let cors = allowlist.cors_layer();
    let allowlist = Arc::new(allowlist);

    let api = prompt_router().route_layer(middleware::from_fn_with_state(allowlist, origin_guard));

    Router::new()
        .merge(api)
        .merge(relay_routes())
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
