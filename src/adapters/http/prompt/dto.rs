//! HTTP and WebSocket DTOs for the prompt endpoint.
//!
//! These types pin the JSON field names clients already use (`userId`,
//! `botResponse`) independently of the domain types.

use serde::{Deserialize, Serialize};

use crate::application::{SendPromptCommand, SendPromptResult};
use crate::domain::foundation::{UserId, ValidationError};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/prompt` and of every WebSocket text frame.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub prompt: Option<String>,
    pub user_id: Option<String>,
}

impl PromptRequest {
    /// Validates the request into a command. `userId` is checked first.
    pub fn into_command(self) -> Result<SendPromptCommand, ValidationError> {
        let user_id = self
            .user_id
            .ok_or_else(|| ValidationError::missing_field("userId"))
            .and_then(UserId::new)?;
        let prompt = self
            .prompt
            .ok_or_else(|| ValidationError::missing_field("prompt"))?;
        Ok(SendPromptCommand::new(user_id, prompt))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Successful reply of `POST /api/prompt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub prompt: String,
    pub bot_response: String,
}

impl From<SendPromptResult> for PromptResponse {
    fn from(result: SendPromptResult) -> Self {
        Self {
            prompt: result.prompt,
            bot_response: result.bot_response,
        }
    }
}

/// Frame sent back over the WebSocket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayReply {
    pub bot_response: String,
}

impl RelayReply {
    /// Text clients see when anything goes wrong.
    pub const ERROR_TEXT: &'static str = "Error processing request";

    pub fn new(bot_response: impl Into<String>) -> Self {
        Self {
            bot_response: bot_response.into(),
        }
    }

    pub fn error() -> Self {
        Self::new(Self::ERROR_TEXT)
    }
}

/// Error body for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
