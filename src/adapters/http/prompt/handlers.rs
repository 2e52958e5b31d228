//! HTTP handlers for the prompt endpoint.
//!
//! These handlers connect Axum routes to the application layer.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{SendPromptError, SendPromptHandler};
use crate::domain::foundation::ValidationError;

use super::dto::{ErrorResponse, PromptRequest, PromptResponse};

/// Client-facing text when `userId` is absent.
pub const USER_ID_REQUIRED: &str = "userId is required to track conversations.";
/// Client-facing text when `prompt` is absent.
pub const PROMPT_REQUIRED: &str = "prompt is required.";
/// Client-facing text for every server-side failure.
pub const INTERNAL_ERROR: &str = "An internal error occurred.";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for prompt handlers.
#[derive(Clone)]
pub struct PromptAppState {
    pub handler: Arc<SendPromptHandler>,
}

impl PromptAppState {
    /// Creates a new PromptAppState.
    pub fn new(handler: Arc<SendPromptHandler>) -> Self {
        Self { handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/prompt
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/prompt - Send a prompt and get the bot's reply.
///
/// # Errors
/// - 400 Bad Request: body is not JSON, or `userId`/`prompt` is missing
/// - 500 Internal Server Error: provider or store failure (details logged only)
pub async fn send_prompt(
    State(state): State<PromptAppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PromptApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected prompt body");
        PromptApiError::BadRequest(rejection.body_text())
    })?;

    let command = request.into_command()?;
    let result = state.handler.handle(command).await?;

    Ok((StatusCode::OK, Json(PromptResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum PromptApiError {
    BadRequest(String),
    Internal(String),
}

impl From<ValidationError> for PromptApiError {
    fn from(err: ValidationError) -> Self {
        match err.field() {
            "userId" => PromptApiError::BadRequest(USER_ID_REQUIRED.to_string()),
            "prompt" => PromptApiError::BadRequest(PROMPT_REQUIRED.to_string()),
            _ => PromptApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<SendPromptError> for PromptApiError {
    fn from(err: SendPromptError) -> Self {
        PromptApiError::Internal(err.to_string())
    }
}

impl IntoResponse for PromptApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            PromptApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            PromptApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
