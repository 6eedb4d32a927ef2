use super::provider_error;
use crate::dtos::{ContentRequest, ExtractTextResponse, GenerateContentResponse};
use crate::services::extraction::{self, ImageUpload};
use crate::services::generator::{self, GenerationRequest};
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

pub async fn extract_text_from_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    let image = read_image_field(&mut multipart).await?;

    tracing::info!(
        filename = image.file_name.as_deref().unwrap_or("unnamed"),
        content_type = %image.content_type,
        size = image.data.len(),
        "Received request to extract text from image"
    );

    let extracted_text = extraction::extract_text(&state.ai, image)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error during text extraction");
            provider_error(e)
        })?;

    tracing::info!("Successfully extracted text from image");

    Ok(Json(ExtractTextResponse {
        success: true,
        extracted_text,
    }))
}

pub async fn generate_content_from_text(
    State(state): State<AppState>,
    Json(body): Json<ContentRequest>,
) -> Result<Json<GenerateContentResponse>, AppError> {
    tracing::info!(
        language = %body.language,
        grade_level = %body.grade_level,
        subject = %body.subject,
        "Received request to generate content"
    );

    let request = GenerationRequest::from(body);
    let result = generator::generate_content(&state.ai, &request)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error during content generation");
            provider_error(e)
        })?;

    tracing::info!("Successfully generated all content");

    Ok(Json(GenerateContentResponse::from(result)))
}

/// Find the `file` part and read it fully. Other parts are skipped.
async fn read_image_field(multipart: &mut Multipart) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(|name| name.to_string());
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?
            .to_vec();

        return Ok(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::UnprocessableEntity(anyhow::anyhow!(
        "Field required: {}",
        FILE_FIELD
    )))
}

/// Keep the status axum derives for the failure, so an upload over the body
/// limit is reported as 413 rather than a generic parse error.
fn multipart_error(err: MultipartError) -> AppError {
    let status = err.status();
    let detail = err.body_text();

    tracing::warn!(status = %status, error = %detail, "Failed to read multipart upload");

    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow::anyhow!("Upload exceeds the size limit: {}", detail))
    } else {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart upload: {}", detail))
    }
}
