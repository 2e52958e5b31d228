//! AI Provider Port - Interface for LLM provider integrations.
//!
//! This port abstracts the chat-completion call, so the prompt flow can be
//! exercised against a mock and the Groq adapter can be swapped for any other
//! OpenAI-compatible service.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AIProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         let last = request.messages.last().map(|t| t.content().to_string());
//!         Ok(CompletionResponse {
//!             content: last.unwrap_or_default(),
//!             usage: TokenUsage::default(),
//!         })
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::Turn;
use crate::domain::foundation::UserId;

/// Port for AI/LLM provider interactions.
///
/// Implementations connect to external AI services and translate between the
/// provider-specific API and our domain types. One call is one round-trip:
/// implementations must not retry.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;
}

/// Request for AI completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation turns (history + current user message).
    pub messages: Vec<Turn>,
    /// System prompt to guide model behavior.
    pub system_prompt: Option<String>,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new completion request with required metadata.
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            metadata,
        }
    }

    /// Appends a whole history, preserving its order.
    pub fn with_turns<'a>(mut self, turns: impl IntoIterator<Item = &'a Turn>) -> Self {
        self.messages.extend(turns.into_iter().cloned());
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Full message list as sent on the wire: system prompt first, then turns.
    pub fn wire_messages(&self) -> Vec<Turn> {
        self.system_prompt
            .iter()
            .map(Turn::system)
            .chain(self.messages.iter().cloned())
            .collect()
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// User making the request.
    pub user_id: UserId,
    /// Trace ID for log correlation.
    pub trace_id: String,
}

impl RequestMetadata {
    /// Creates new request metadata.
    pub fn new(user_id: UserId, trace_id: impl Into<String>) -> Self {
        Self {
            user_id,
            trace_id: trace_id.into(),
        }
    }
}

/// Response from AI completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Token usage reported by the provider.
    pub usage: TokenUsage,
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited by provider")]
    RateLimited,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered without any choice or content.
    #[error("provider returned no completion")]
    EmptyResponse,

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AIError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Role;

    fn test_metadata() -> RequestMetadata {
        RequestMetadata::new(UserId::new("test-user").unwrap(), "trace-123")
    }

    #[test]
    fn completion_request_builder_works() {
        let history = vec![Turn::user("Hello")];
        let request = CompletionRequest::new(test_metadata())
            .with_turns(&history)
            .with_system_prompt("Be helpful");

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role(), Role::User);
        assert_eq!(request.messages[0].content(), "Hello");
        assert_eq!(request.system_prompt, Some("Be helpful".to_string()));
        assert_eq!(request.metadata.trace_id, "trace-123");
    }

    #[test]
    fn wire_messages_put_system_prompt_first() {
        let history = vec![Turn::user("one"), Turn::assistant("two"), Turn::user("three")];
        let request = CompletionRequest::new(test_metadata())
            .with_turns(&history)
            .with_system_prompt("rules");

        let wire = request.wire_messages();
        assert_eq!(wire.len(), 4);
        assert_eq!(wire[0], Turn::system("rules"));
        assert_eq!(wire[1], Turn::user("one"));
        assert_eq!(wire[3], Turn::user("three"));
    }

    #[test]
    fn wire_messages_without_system_prompt() {
        let history = [Turn::user("hi")];
        let request = CompletionRequest::new(test_metadata()).with_turns(&history);
        assert_eq!(request.wire_messages(), vec![Turn::user("hi")]);
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(AIError::EmptyResponse.to_string(), "provider returned no completion");
        assert_eq!(
            AIError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
        assert_eq!(
            AIError::unavailable("503").to_string(),
            "provider unavailable: 503"
        );
    }
}
