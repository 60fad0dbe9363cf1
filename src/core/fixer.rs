// src/core/fixer.rs — Single-shot error correction

use std::sync::Arc;

use super::prompts;
use crate::infra::config::FixConfig;
use crate::infra::errors::AutoCoderError;
use crate::provider::{ChatRequest, ModelProvider};
use crate::util::tail_chars;

/// Asks the model to repair a failing program. One request per call; the
/// caller decides whether to retest.
pub struct ErrorFixer {
    provider: Arc<dyn ModelProvider>,
    model: String,
    max_error_length: usize,
}

impl ErrorFixer {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>, config: &FixConfig) -> Self {
        Self {
            provider,
            model: model.into(),
            max_error_length: config.max_error_length,
        }
    }

    /// Keep the most recent `max_error_length` characters of `stderr`.
    pub fn truncate_error<'a>(&self, stderr: &'a str) -> &'a str {
        tail_chars(stderr, self.max_error_length)
    }

    pub fn build_request(&self, code: &str, stderr: &str) -> ChatRequest {
        ChatRequest::system_and_user(
            self.model.clone(),
            prompts::ERROR_CORRECTION_PROMPT,
            prompts::fix_message(code, self.truncate_error(stderr)),
        )
    }

    /// Returns the raw model response; extraction is the caller's job.
    pub async fn fix(&self, code: &str, stderr: &str) -> Result<String, AutoCoderError> {
        let request = self.build_request(code, stderr);
        tracing::debug!(
            error_chars = stderr.chars().count(),
            sent_chars = self.truncate_error(stderr).chars().count(),
            "Requesting fix"
        );
        let response = self.provider.chat(request).await?;
        Ok(response.content)
    }
}
