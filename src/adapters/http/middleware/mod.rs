//! HTTP middleware for axum.
//!
//! - `origin` - CORS allowlist and the guard that enforces it

pub mod origin;

pub use origin::{origin_guard, OriginAllowlist, CORS_REJECTION};
