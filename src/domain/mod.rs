//! Domain layer - values shared by every adapter.

pub mod conversation;
pub mod foundation;
