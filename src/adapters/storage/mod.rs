//! Storage adapters - conversation history backends.

mod in_memory_conversation_store;

pub use in_memory_conversation_store::InMemoryConversationStore;
