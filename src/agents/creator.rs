//! The Creator: drafts ad copy with an LLM.
//!
//! The first round gets a plain brief. Every later round gets the full list
//! of rejected drafts and their feedback, so earlier mistakes are not repeated.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;

use super::{AgentError, GenerationProvider, GenerationRequest};
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::PromptRenderer;
use crate::prompt::templates::{CREATOR_FIRST_DRAFT, CREATOR_REVISION, CREATOR_SYSTEM};

#[derive(Serialize)]
struct RejectionEntry<'a> {
    number: usize,
    draft: &'a str,
    feedback: &'a str,
}

#[derive(Serialize)]
struct CreatorPrompt<'a> {
    product: &'a str,
    audience: &'a str,
    rejections: Vec<RejectionEntry<'a>>,
    latest_feedback: &'a str,
}

/// LLM-backed generation provider
pub struct Creator {
    client: Arc<dyn LlmClient>,
    renderer: Arc<PromptRenderer>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl Creator {
    pub fn new(client: Arc<dyn LlmClient>, renderer: Arc<PromptRenderer>) -> Self {
        Self {
            client,
            renderer,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set max tokens per draft
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the completion request for a generation request
    fn build_request(&self, request: &GenerationRequest) -> Result<CompletionRequest, AgentError> {
        let prompt = CreatorPrompt {
            product: &request.product,
            audience: &request.audience,
            rejections: request
                .rejections
                .iter()
                .enumerate()
                .map(|(i, record)| RejectionEntry {
                    number: i + 1,
                    draft: &record.candidate_text,
                    feedback: record.feedback.as_deref().unwrap_or_default(),
                })
                .collect(),
            latest_feedback: request.latest_feedback().unwrap_or_default(),
        };

        let template = if request.is_first_draft() {
            CREATOR_FIRST_DRAFT
        } else {
            CREATOR_REVISION
        };

        let system = self.render(CREATOR_SYSTEM, &prompt)?;
        let user = self.render(template, &prompt)?;

        let mut completion = CompletionRequest::new(system).with_user_message(user);
        completion.max_tokens = self.max_tokens;
        completion.temperature = self.temperature;
        Ok(completion)
    }

    fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String, AgentError> {
        self.renderer.render(name, context).map_err(|e| AgentError::Prompt(e.to_string()))
    }
}

#[async_trait]
impl GenerationProvider for Creator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AgentError> {
        let completion = self.build_request(request)?;
        debug!(
            "Creator: drafting with {} prior rejection(s) via {}",
            request.rejections.len(),
            self.client.model()
        );

        let response = self.client.complete(completion).await?;
        if response.stop_reason.is_truncated() {
            warn!("Creator: completion stopped early ({:?})", response.stop_reason);
        }

        let draft = response.content.trim();
        if draft.is_empty() {
            return Err(AgentError::EmptyCompletion);
        }

        Ok(draft.to_string())
    }
}
