//! Conversation module - turns, histories and the fixed system preamble.

mod conversation;
mod message;
mod preamble;

pub use conversation::Conversation;
pub use message::{Role, Turn};
pub use preamble::{SALES_TEST_TRIGGER, SYSTEM_PREAMBLE, TEST_ONLY_REPLY};
