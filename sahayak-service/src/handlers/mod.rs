pub mod content;
pub mod health;

pub use content::{extract_text_from_image, generate_content_from_text};
pub use health::{health_check, readiness_check};

use crate::services::providers::ProviderError;
use service_core::error::AppError;

/// Every provider failure, including the unconfigured case, is a 500 whose
/// detail is the error message.
pub(crate) fn provider_error(err: ProviderError) -> AppError {
    AppError::InternalError(anyhow::Error::new(err))
}
