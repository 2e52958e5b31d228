//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Groq chat completions and a scriptable mock
//! - `storage` - In-memory conversation store
//! - `http` - axum routes, the WebSocket relay, CORS enforcement

pub mod ai;
pub mod http;
pub mod storage;
