//! Prompt Relay - a thin chat backend in front of Groq.
//!
//! Prompts arrive over `POST /api/prompt` or a WebSocket, are appended to a
//! per-user in-memory conversation, and are forwarded with the whole history
//! behind a fixed system preamble. The reply is stored and returned.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
