//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod prompt;

pub use prompt::{SendPromptCommand, SendPromptError, SendPromptHandler, SendPromptResult};
