use crate::services::generator::{GenerationRequest, GenerationResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/generate-content-from-text`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentRequest {
    pub language: String,
    pub grade_level: String,
    pub subject: String,
    /// The topic, usually text previously extracted from an image.
    pub extracted_text: String,
}

impl From<ContentRequest> for GenerationRequest {
    fn from(req: ContentRequest) -> Self {
        Self {
            language: req.language,
            grade_level: req.grade_level,
            subject: req.subject,
            topic_text: req.extracted_text,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractTextResponse {
    pub success: bool,
    pub extracted_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    pub success: bool,
    pub lesson_plan: String,
    pub worksheet: String,
    pub quiz: String,
}

impl From<GenerationResult> for GenerateContentResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            lesson_plan: result.lesson_plan,
            worksheet: result.worksheet,
            quiz: result.quiz,
        }
    }
}
