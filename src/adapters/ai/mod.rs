//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GroqProvider` - Groq chat completions (OpenAI-compatible wire format)
//! - `MockAIProvider` - Configurable mock for testing

mod groq_provider;
mod mock_provider;

pub use groq_provider::{GroqConfig, GroqProvider, DEFAULT_MODEL};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
