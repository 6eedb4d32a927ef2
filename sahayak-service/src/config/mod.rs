use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default request timeout for calls to the generative model API.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default multipart body limit for image uploads (20MB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Port the Vite dev server of the frontend listens on.
const FRONTEND_PORT: u16 = 5173;

#[derive(Debug, Clone, Deserialize)]
pub struct SahayakConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub models: ModelConfig,
    pub google: GoogleConfig,
    pub cors: CorsConfig,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model used for image + text input (OCR).
    pub vision_model: String,
    /// Model used for text-only generation.
    pub text_model: String,
    pub request_timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vision_model: "gemini-2.5-pro".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Deserialize, Default)]
pub struct GoogleConfig {
    /// Absent keys are not an error: the service starts with AI disabled.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl SahayakConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let config = SahayakConfig {
            common: common_config,
            environment: get_env("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),
            log_level: get_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            otlp_endpoint: get_env("OTLP_ENDPOINT"),
            models: ModelConfig {
                vision_model: get_env("GENAI_VISION_MODEL")
                    .unwrap_or_else(|| ModelConfig::default().vision_model),
                text_model: get_env("GENAI_TEXT_MODEL")
                    .unwrap_or_else(|| ModelConfig::default().text_model),
                request_timeout_secs: parse_env(
                    "GENAI_REQUEST_TIMEOUT_SECS",
                    DEFAULT_REQUEST_TIMEOUT_SECS,
                )?,
            },
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY"),
            },
            cors: CorsConfig {
                allowed_origin: allowed_origin(get_env("CODESPACE_NAME").as_deref()),
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        Ok(config)
    }

    /// Configuration for in-process tests: random port, no key, local CORS origin.
    pub fn for_tests() -> Self {
        SahayakConfig {
            common: core_config::Config { port: 0 },
            environment: "test".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            models: ModelConfig::default(),
            google: GoogleConfig::default(),
            cors: CorsConfig {
                allowed_origin: allowed_origin(None),
            },
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// The single origin allowed by CORS.
///
/// A GitHub Codespace exposes the frontend at `https://<name>-5173.app.github.dev`;
/// anywhere else the frontend runs on the local Vite dev server.
pub fn allowed_origin(codespace_name: Option<&str>) -> String {
    match codespace_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("https://{}-{}.app.github.dev", name, FRONTEND_PORT),
        None => format!("http://localhost:{}", FRONTEND_PORT),
    }
}

fn get_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}
