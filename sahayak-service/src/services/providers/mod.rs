//! Generative model abstractions and implementations.
//!
//! Handlers only see [`GenerativeModel`], so the Gemini backend can be swapped
//! for the scripted mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("AI Model not configured.")]
    NotConfigured,

    #[error("{0}")]
    ApiError(String),

    #[error("Rate limited by the AI service")]
    RateLimited,

    #[error("Response blocked by the AI service's safety filters")]
    ContentFiltered,

    #[error("The AI service returned no text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Generation task failed: {0}")]
    TaskFailed(String),
}

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: Vec<u8> },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }
}

/// A handle bound to one model variant.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Identifier of the underlying model, e.g. `gemini-2.5-flash`.
    fn model_name(&self) -> &str;

    /// Generate a single text response for the given prompt parts.
    async fn generate(&self, parts: &[Part]) -> Result<String, ProviderError>;
}
