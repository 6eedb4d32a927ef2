//! Process-wide AI client configuration.
//!
//! Built once at startup and cloned into every handler through the router
//! state. A missing or unusable API key leaves the client in degraded mode:
//! the service still starts, and every AI-dependent call fails fast.

use crate::config::ModelConfig;
use crate::services::providers::gemini::{GeminiConfig, GeminiModel};
use crate::services::providers::{GenerativeModel, ProviderError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// The two model handles the service uses.
#[derive(Clone)]
pub struct ModelHandles {
    /// Image + text input.
    pub vision: Arc<dyn GenerativeModel>,
    /// Text-only input.
    pub text: Arc<dyn GenerativeModel>,
}

#[derive(Clone)]
pub struct AiClient {
    models: Option<ModelHandles>,
}

impl AiClient {
    /// Configure Gemini handles from an API key. Never fails; logs and
    /// returns an unconfigured client instead.
    pub fn configure(api_key: Option<&str>, models: &ModelConfig) -> Self {
        let api_key = match api_key.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => key,
            None => {
                tracing::warn!("GOOGLE_API_KEY not found in environment variables");
                tracing::error!("AI model configuration failed: API key is not set");
                return Self::unconfigured();
            }
        };

        let client = match Client::builder()
            .timeout(Duration::from_secs(models.request_timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "AI model configuration failed: could not build HTTP client");
                return Self::unconfigured();
            }
        };

        let vision = GeminiModel::with_client(
            GeminiConfig::new(api_key, models.vision_model.clone()),
            client.clone(),
        );
        let text = GeminiModel::with_client(
            GeminiConfig::new(api_key, models.text_model.clone()),
            client,
        );

        tracing::info!(
            vision_model = %models.vision_model,
            text_model = %models.text_model,
            "AI models configured successfully"
        );

        Self::from_models(Arc::new(vision), Arc::new(text))
    }

    /// A client with arbitrary model handles, e.g. mocks.
    pub fn from_models(vision: Arc<dyn GenerativeModel>, text: Arc<dyn GenerativeModel>) -> Self {
        Self {
            models: Some(ModelHandles { vision, text }),
        }
    }

    pub fn unconfigured() -> Self {
        Self { models: None }
    }

    pub fn is_ready(&self) -> bool {
        self.models.is_some()
    }

    /// The model handles, or `NotConfigured` in degraded mode.
    pub fn models(&self) -> Result<&ModelHandles, ProviderError> {
        self.models.as_ref().ok_or(ProviderError::NotConfigured)
    }
}

impl std::fmt::Debug for AiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("AiClient");
        debug.field("ready", &self.is_ready());
        if let Some(models) = &self.models {
            debug
                .field("vision_model", &models.vision.model_name())
                .field("text_model", &models.text.model_name());
        }
        debug.finish()
    }
}
