//! Conversation Store Port - Interface for keeping per-user chat history.
//!
//! The store owns the ordered turns of every identifier. The in-memory
//! adapter lives for the process; a persistent backing can implement the
//! same contract without touching the prompt flow.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::conversation::{Conversation, Turn};
use crate::domain::foundation::UserId;

/// Errors that can occur during conversation storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Conversation not found for user: {0}")]
    NotFound(UserId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Port for reading and appending conversation history
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns a snapshot of the user's conversation, creating an empty one
    /// on first use.
    async fn get_or_create(&self, user_id: &UserId) -> Result<Conversation, StoreError>;

    /// Returns a snapshot of the user's conversation without creating it.
    async fn get(&self, user_id: &UserId) -> Result<Option<Conversation>, StoreError>;

    /// Appends one turn to the user's conversation and returns its new
    /// length.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the conversation was never created
    /// or has been evicted.
    async fn append(&self, user_id: &UserId, turn: Turn) -> Result<usize, StoreError>;

    /// Drops every turn past `len`, undoing appends made after a snapshot of
    /// that length.
    async fn truncate(&self, user_id: &UserId, len: usize) -> Result<(), StoreError>;

    /// Removes conversations untouched for longer than `ttl`, keeping any
    /// whose user is listed in `in_flight`.
    ///
    /// Returns the number of conversations removed.
    async fn evict_idle(
        &self,
        ttl: Duration,
        in_flight: &HashSet<UserId>,
    ) -> Result<usize, StoreError>;

    /// Number of identifiers currently holding a conversation.
    async fn conversation_count(&self) -> Result<usize, StoreError>;
}
