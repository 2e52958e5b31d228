//! HTTP adapter - axum routes, handlers, middleware.

pub mod health;
pub mod middleware;
pub mod prompt;
pub mod router;

pub use middleware::OriginAllowlist;
pub use prompt::PromptAppState;
pub use router::app_router;
