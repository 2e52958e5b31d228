//! In-Memory Conversation Store Adapter
//!
//! Keeps every user's turns in a process-local map. Nothing survives a
//! restart. Growth is bounded by the per-conversation turn cap and by
//! idle eviction.
//!
//! The cap is applied when an assistant turn lands, so a pending user turn
//! may sit one past it. Rolling that turn back with `truncate` then restores
//! the history exactly.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::conversation::{Conversation, Role, Turn};
use crate::domain::foundation::UserId;
use crate::ports::{ConversationStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    conversation: Conversation,
    last_active: Instant,
}

impl Entry {
    fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            last_active: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }
}

/// In-memory storage for conversation history
#[derive(Debug, Clone)]
pub struct InMemoryConversationStore {
    entries: Arc<RwLock<HashMap<UserId, Entry>>>,
    max_turns: usize,
}

impl InMemoryConversationStore {
    /// Create a store with no turn cap.
    pub fn new() -> Self {
        Self::with_max_turns(0)
    }

    /// Create a store that keeps at most `max_turns` per user (0 = unbounded).
    pub fn with_max_turns(max_turns: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_turns,
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get_or_create(&self, user_id: &UserId) -> Result<Conversation, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(user_id.clone()).or_insert_with(|| {
            tracing::debug!(user_id = %user_id, "Created conversation");
            Entry::new()
        });
        entry.touch();
        Ok(entry.conversation.clone())
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<Conversation>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(user_id).map(|e| e.conversation.clone()))
    }

    async fn append(&self, user_id: &UserId, turn: Turn) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.clone()))?;

        let completes_exchange = turn.role() == Role::Assistant;
        entry.conversation.push(turn);
        if completes_exchange {
            let dropped = entry.conversation.enforce_limit(self.max_turns);
            if dropped > 0 {
                tracing::debug!(user_id = %user_id, dropped, "Trimmed conversation to turn cap");
            }
        }
        entry.touch();
        Ok(entry.conversation.len())
    }

    async fn truncate(&self, user_id: &UserId, len: usize) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.clone()))?;
        entry.conversation.truncate(len);
        Ok(())
    }

    async fn evict_idle(
        &self,
        ttl: Duration,
        in_flight: &HashSet<UserId>,
    ) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|user_id, entry| {
            in_flight.contains(user_id) || entry.last_active.elapsed() <= ttl
        });
        Ok(before - entries.len())
    }

    async fn conversation_count(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().await.len())
    }
}
