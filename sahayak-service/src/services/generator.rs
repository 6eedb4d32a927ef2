//! Lesson content generation.
//!
//! One topic fans out into three independent prompts (lesson plan, worksheet,
//! quiz) against the text model. The results are joined back in that fixed
//! order; a single failure fails the whole request.

use crate::services::ai_client::AiClient;
use crate::services::providers::{GenerativeModel, Part, ProviderError};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Input for one generation request. Empty fields are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub language: String,
    pub grade_level: String,
    pub subject: String,
    pub topic_text: String,
}

/// The three generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub lesson_plan: String,
    pub worksheet: String,
    pub quiz: String,
}

/// The documents produced for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    LessonPlan,
    Worksheet,
    Quiz,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::LessonPlan,
        DocumentKind::Worksheet,
        DocumentKind::Quiz,
    ];

    fn request_phrase(self) -> &'static str {
        match self {
            DocumentKind::LessonPlan => "a lesson plan",
            DocumentKind::Worksheet => "a worksheet",
            DocumentKind::Quiz => "a 5-question quiz with answers",
        }
    }

    pub fn prompt(self, request: &GenerationRequest) -> String {
        format!(
            "Generate {} for a {} {} class in {}. Topic: '{}'. Format with Markdown.",
            self.request_phrase(),
            request.grade_level,
            request.subject,
            request.language,
            request.topic_text
        )
    }
}

/// Generate the lesson plan, worksheet and quiz for `request` concurrently.
pub async fn generate_content(
    ai: &AiClient,
    request: &GenerationRequest,
) -> Result<GenerationResult, ProviderError> {
    let model = Arc::clone(&ai.models()?.text);

    let [lesson_plan, worksheet, quiz] =
        DocumentKind::ALL.map(|kind| spawn_generation(Arc::clone(&model), kind.prompt(request)));

    // Dropping the remaining handles on failure detaches those tasks; they
    // still run to completion and their output is discarded.
    let (lesson_plan, worksheet, quiz) =
        tokio::try_join!(joined(lesson_plan), joined(worksheet), joined(quiz))?;

    Ok(GenerationResult {
        lesson_plan,
        worksheet,
        quiz,
    })
}

fn spawn_generation(
    model: Arc<dyn GenerativeModel>,
    prompt: String,
) -> JoinHandle<Result<String, ProviderError>> {
    tokio::spawn(async move { model.generate(&[Part::Text(prompt)]).await })
}

async fn joined(
    handle: JoinHandle<Result<String, ProviderError>>,
) -> Result<String, ProviderError> {
    handle
        .await
        .map_err(|e| ProviderError::TaskFailed(e.to_string()))?
}
