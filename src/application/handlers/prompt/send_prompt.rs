//! SendPrompt command handler.
//!
//! The one operation behind both the HTTP endpoint and the WebSocket relay:
//! append the user's turn, ask the provider for a reply with the whole
//! history behind the system preamble, append the reply.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::conversation::{Turn, SYSTEM_PREAMBLE};
use crate::domain::foundation::UserId;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, ConversationStore, RequestMetadata, StoreError,
};

use super::user_locks::UserLocks;

/// Command to send one prompt on behalf of a user.
#[derive(Debug, Clone)]
pub struct SendPromptCommand {
    /// Conversation key.
    pub user_id: UserId,
    /// The user's message.
    pub prompt: String,
}

impl SendPromptCommand {
    /// Creates a new send prompt command.
    pub fn new(user_id: UserId, prompt: impl Into<String>) -> Self {
        Self {
            user_id,
            prompt: prompt.into(),
        }
    }
}

/// Errors that can occur when sending a prompt.
#[derive(Debug, Error)]
pub enum SendPromptError {
    /// The provider call failed or returned nothing.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    /// Reading or writing the conversation failed.
    #[error("Conversation store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of sending a prompt.
#[derive(Debug, Clone)]
pub struct SendPromptResult {
    /// The prompt as received.
    pub prompt: String,
    /// The provider's reply, now stored as the assistant turn.
    pub bot_response: String,
    /// Conversation length after the exchange.
    pub conversation_len: usize,
}

/// Handler for [`SendPromptCommand`].
///
/// Requests for the same user are serialized; a failed provider call rolls
/// the user turn back so stored history keeps alternating user/assistant.
pub struct SendPromptHandler {
    store: Arc<dyn ConversationStore>,
    ai_provider: Arc<dyn AIProvider>,
    locks: UserLocks,
    system_prompt: String,
}

impl SendPromptHandler {
    /// Creates a new handler using the built-in system preamble.
    pub fn new(store: Arc<dyn ConversationStore>, ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            store,
            ai_provider,
            locks: UserLocks::new(),
            system_prompt: SYSTEM_PREAMBLE.to_string(),
        }
    }

    /// Replaces the system preamble.
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Handles a send prompt command.
    pub async fn handle(&self, cmd: SendPromptCommand) -> Result<SendPromptResult, SendPromptError> {
        let trace_id = Uuid::new_v4().to_string();
        let _guard = self.locks.acquire(&cmd.user_id).await;

        // The snapshot plus the pushed turn mirrors the store: the turn cap
        // is only applied once the reply lands
        let mut conversation = self.store.get_or_create(&cmd.user_id).await?;
        let before_prompt = conversation.len();
        let user_turn = Turn::user(cmd.prompt.clone());
        self.store.append(&cmd.user_id, user_turn.clone()).await?;
        conversation.push(user_turn);

        tracing::info!(
            trace_id = %trace_id,
            user_id = %cmd.user_id,
            turns = conversation.len(),
            "Forwarding prompt to provider"
        );

        let request = CompletionRequest::new(RequestMetadata::new(cmd.user_id.clone(), &trace_id))
            .with_system_prompt(self.system_prompt.as_str())
            .with_turns(conversation.turns());

        let completion = match self.ai_provider.complete(request).await {
            Ok(completion) => completion,
            Err(err) => {
                tracing::error!(
                    trace_id = %trace_id,
                    user_id = %cmd.user_id,
                    error = %err,
                    "Provider call failed, rolling back user turn"
                );
                self.store.truncate(&cmd.user_id, before_prompt).await?;
                return Err(err.into());
            }
        };

        let conversation_len = self
            .store
            .append(&cmd.user_id, Turn::assistant(completion.content.clone()))
            .await?;

        tracing::info!(
            trace_id = %trace_id,
            user_id = %cmd.user_id,
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            turns = conversation_len,
            "Prompt answered"
        );

        Ok(SendPromptResult {
            prompt: cmd.prompt,
            bot_response: completion.content,
            conversation_len,
        })
    }

    /// Evicts conversations idle longer than `ttl` and forgets their locks.
    ///
    /// Users with a request in flight are never evicted.
    pub async fn sweep_idle(&self, ttl: Duration) -> Result<usize, StoreError> {
        let in_flight = self.locks.in_flight();
        let evicted = self.store.evict_idle(ttl, &in_flight).await?;
        let pruned = self.locks.prune();
        if evicted > 0 || pruned > 0 {
            tracing::info!(evicted, pruned_locks = pruned, "Swept idle conversations");
        }
        Ok(evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::storage::InMemoryConversationStore;
    use crate::domain::conversation::{Role, SALES_TEST_TRIGGER, TEST_ONLY_REPLY};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn handler_with(
        provider: MockAIProvider,
        store: InMemoryConversationStore,
    ) -> SendPromptHandler {
        SendPromptHandler::new(Arc::new(store), Arc::new(provider))
    }

    #[tokio::test]
    async fn first_prompt_stores_user_and_assistant_turns() {
        let store = InMemoryConversationStore::new();
        let provider = MockAIProvider::new().with_response(TEST_ONLY_REPLY);
        let handler = handler_with(provider, store.clone());

        let result = handler
            .handle(SendPromptCommand::new(user("new"), "hello"))
            .await
            .unwrap();

        assert_eq!(result.bot_response, TEST_ONLY_REPLY);
        assert_eq!(result.conversation_len, 2);
        let conversation = store.get(&user("new")).await.unwrap().unwrap();
        assert_eq!(
            conversation.turns(),
            &[Turn::user("hello"), Turn::assistant(TEST_ONLY_REPLY)]
        );
    }

    #[tokio::test]
    async fn sequential_prompts_grow_by_two_in_order() {
        let store = InMemoryConversationStore::new();
        let handler = handler_with(MockAIProvider::new(), store.clone());

        for i in 0..5 {
            handler
                .handle(SendPromptCommand::new(user("u1"), format!("p{i}")))
                .await
                .unwrap();
        }

        let conversation = store.get(&user("u1")).await.unwrap().unwrap();
        assert_eq!(conversation.len(), 10);
        for (i, pair) in conversation.turns().chunks(2).enumerate() {
            assert_eq!(pair[0], Turn::user(format!("p{i}")));
            assert_eq!(pair[1].role(), Role::Assistant);
        }
    }

    #[tokio::test]
    async fn provider_sees_preamble_then_full_history() {
        let provider = MockAIProvider::new()
            .with_response("first reply")
            .with_response("1. ¿Cuánto cuesta?");
        let handler = handler_with(provider.clone(), InMemoryConversationStore::new());

        handler
            .handle(SendPromptCommand::new(user("u1"), "hola"))
            .await
            .unwrap();
        handler
            .handle(SendPromptCommand::new(user("u1"), SALES_TEST_TRIGGER))
            .await
            .unwrap();

        let calls = provider.get_calls();
        let wire = calls[1].wire_messages();
        assert_eq!(wire[0], Turn::system(SYSTEM_PREAMBLE));
        assert_eq!(
            &wire[1..],
            &[
                Turn::user("hola"),
                Turn::assistant("first reply"),
                Turn::user(SALES_TEST_TRIGGER)
            ]
        );
    }

    #[tokio::test]
    async fn provider_failure_rolls_back_user_turn() {
        let store = InMemoryConversationStore::new();
        let provider = MockAIProvider::new()
            .with_response("ok")
            .with_error(MockError::Unavailable {
                message: "down".to_string(),
            });
        let handler = handler_with(provider, store.clone());

        handler
            .handle(SendPromptCommand::new(user("u1"), "first"))
            .await
            .unwrap();
        let err = handler
            .handle(SendPromptCommand::new(user("u1"), "second"))
            .await
            .unwrap_err();

        assert!(matches!(err, SendPromptError::Provider(AIError::Unavailable { .. })));
        let conversation = store.get(&user("u1")).await.unwrap().unwrap();
        assert_eq!(conversation.turns(), &[Turn::user("first"), Turn::assistant("ok")]);
    }

    #[tokio::test]
    async fn empty_provider_reply_is_an_error() {
        let store = InMemoryConversationStore::new();
        let provider = MockAIProvider::new().with_error(MockError::EmptyResponse);
        let handler = handler_with(provider, store.clone());

        let err = handler
            .handle(SendPromptCommand::new(user("u1"), "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, SendPromptError::Provider(AIError::EmptyResponse)));
        assert!(store.get(&user("u1")).await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_prompts_for_same_user_stay_paired() {
        let store = InMemoryConversationStore::new();
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(20));
        let handler = Arc::new(handler_with(provider, store.clone()));

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let handler = handler.clone();
                tokio::spawn(async move {
                    handler
                        .handle(SendPromptCommand::new(user("shared"), format!("p{i}")))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let conversation = store.get(&user("shared")).await.unwrap().unwrap();
        assert_eq!(conversation.len(), 16);
        for pair in conversation.turns().chunks(2) {
            assert_eq!(pair[0].role(), Role::User);
            assert_eq!(pair[1].role(), Role::Assistant);
        }
    }

    #[tokio::test]
    async fn turn_cap_bounds_history_sent_and_stored() {
        let store = InMemoryConversationStore::with_max_turns(4);
        let provider = MockAIProvider::new();
        let handler = handler_with(provider.clone(), store.clone());

        for i in 0..4 {
            handler
                .handle(SendPromptCommand::new(user("u1"), format!("p{i}")))
                .await
                .unwrap();
        }

        let conversation = store.get(&user("u1")).await.unwrap().unwrap();
        assert_eq!(conversation.len(), 4);
        assert_eq!(conversation.turns()[0], Turn::user("p2"));

        // Capped history plus the pending prompt
        let last_call = provider.get_calls().pop().unwrap();
        assert_eq!(last_call.messages.len(), 5);
        assert_eq!(last_call.messages.last().unwrap(), &Turn::user("p3"));
    }

    #[tokio::test]
    async fn custom_system_prompt_is_used() {
        let provider = MockAIProvider::new();
        let handler = handler_with(provider.clone(), InMemoryConversationStore::new())
            .with_system_prompt("be brief");

        handler
            .handle(SendPromptCommand::new(user("u1"), "hi"))
            .await
            .unwrap();

        assert_eq!(provider.get_calls()[0].system_prompt.as_deref(), Some("be brief"));
    }

    #[tokio::test]
    async fn sweep_idle_evicts_stale_conversations() {
        let store = InMemoryConversationStore::new();
        let handler = handler_with(MockAIProvider::new(), store.clone());
        handler
            .handle(SendPromptCommand::new(user("u1"), "hi"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let evicted = handler.sweep_idle(Duration::from_millis(10)).await.unwrap();

        assert_eq!(evicted, 1);
        assert_eq!(store.conversation_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn provider_failure_at_turn_cap_restores_history() {
        let store = InMemoryConversationStore::with_max_turns(4);
        let provider = MockAIProvider::new()
            .with_response("a0")
            .with_response("a1")
            .with_error(MockError::RateLimited);
        let handler = handler_with(provider, store.clone());

        for prompt in ["q0", "q1"] {
            handler
                .handle(SendPromptCommand::new(user("u1"), prompt))
                .await
                .unwrap();
        }
        let before = store.get(&user("u1")).await.unwrap().unwrap();

        let err = handler
            .handle(SendPromptCommand::new(user("u1"), "q2"))
            .await
            .unwrap_err();

        assert!(matches!(err, SendPromptError::Provider(AIError::RateLimited)));
        let after = store.get(&user("u1")).await.unwrap().unwrap();
        assert_eq!(before, after);
        assert_eq!(
            after.turns(),
            &[
                Turn::user("q0"),
                Turn::assistant("a0"),
                Turn::user("q1"),
                Turn::assistant("a1")
            ]
        );
    }

    #[tokio::test]
    async fn sweep_idle_spares_conversation_with_request_in_flight() {
        let store = InMemoryConversationStore::new();
        let provider = MockAIProvider::new()
            .with_response("late reply")
            .with_delay(Duration::from_millis(200));
        let handler = Arc::new(handler_with(provider, store.clone()));

        let pending = {
            let handler = handler.clone();
            tokio::spawn(async move {
                handler
                    .handle(SendPromptCommand::new(user("u1"), "hi"))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let evicted = handler.sweep_idle(Duration::from_millis(50)).await.unwrap();
        let result = pending.await.unwrap().unwrap();

        assert_eq!(evicted, 0);
        assert_eq!(result.bot_response, "late reply");
        assert_eq!(result.conversation_len, 2);
        assert_eq!(store.get(&user("u1")).await.unwrap().unwrap().len(), 2);
    }
}
