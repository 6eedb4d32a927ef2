//! Mock provider implementation for testing.

use super::{GenerativeModel, Part, ProviderError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted model: echoes the prompt, with optional per-prompt delays and failures.
///
/// Rules match on a substring of the flattened prompt.
pub struct MockModel {
    name: String,
    fixed_reply: Option<String>,
    delays: Vec<(String, Duration)>,
    failures: Vec<String>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl MockModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_reply: None,
            delays: Vec::new(),
            failures: Vec::new(),
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// Always answer with `reply` instead of echoing the prompt.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.fixed_reply = Some(reply.into());
        self
    }

    /// Sleep for `delay` before answering prompts containing `needle`.
    pub fn with_delay(mut self, needle: impl Into<String>, delay: Duration) -> Self {
        self.delays.push((needle.into(), delay));
        self
    }

    /// Fail prompts containing `needle`.
    pub fn failing_on(mut self, needle: impl Into<String>) -> Self {
        self.failures.push(needle.into());
        self
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `generate` calls that ran to the end, successfully or not.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    fn flatten(parts: &[Part]) -> String {
        parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => text.clone(),
                Part::InlineData { mime_type, data } => {
                    format!("[{} {} bytes]", mime_type, data.len())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, parts: &[Part]) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = Self::flatten(parts);

        let delay = self
            .delays
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, delay)| *delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.completed.fetch_add(1, Ordering::SeqCst);

        if let Some(needle) = self
            .failures
            .iter()
            .find(|needle| prompt.contains(needle.as_str()))
        {
            return Err(ProviderError::ApiError(format!(
                "mock failure on '{}'",
                needle
            )));
        }

        Ok(match &self.fixed_reply {
            Some(reply) => reply.clone(),
            None => format!("{}: {}", self.name, prompt),
        })
    }
}
