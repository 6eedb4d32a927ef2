//! Text extraction (OCR) from uploaded images.

use crate::services::ai_client::AiClient;
use crate::services::providers::{Part, ProviderError};

pub const OCR_PROMPT: &str = "You are an OCR expert. Extract all readable text from this image. Present it cleanly and accurately.";

/// An uploaded image. Neither the bytes nor the declared type are checked.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Send the image with the OCR prompt to the vision model.
pub async fn extract_text(ai: &AiClient, image: ImageUpload) -> Result<String, ProviderError> {
    let models = ai.models()?;

    let parts = [
        Part::text(OCR_PROMPT),
        Part::InlineData {
            mime_type: image.content_type,
            data: image.data,
        },
    ];

    models.vision.generate(&parts).await
}
