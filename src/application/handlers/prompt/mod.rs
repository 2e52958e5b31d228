//! Prompt handlers - the relay's single command.

mod send_prompt;
mod user_locks;

pub use send_prompt::{SendPromptCommand, SendPromptError, SendPromptHandler, SendPromptResult};
pub use user_locks::UserLocks;
