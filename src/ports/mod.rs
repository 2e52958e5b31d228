//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - chat-completion provider (Groq, mock)
//! - `ConversationStore` - per-user turn history (in-memory)

mod ai_provider;
mod conversation_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, RequestMetadata, TokenUsage,
};
pub use conversation_store::{ConversationStore, StoreError};
