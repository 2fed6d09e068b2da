//! The Editor: reviews ad copy with an LLM.
//!
//! The model is asked to answer in a strict two-line format:
//!
//! ```text
//! DECISION: APPROVED | REJECTED
//! FEEDBACK: <one sentence>
//! ```
//!
//! Anything that does not parse to one of the two decisions is an error, not
//! a silent rejection.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Serialize;

use super::{AgentError, EvaluationProvider, EvaluationRequest};
use crate::domain::Evaluation;
use crate::llm::{CompletionRequest, LlmClient};
use crate::prompt::PromptRenderer;
use crate::prompt::templates::{EDITOR_REVIEW, EDITOR_SYSTEM};

const DECISION_PREFIX: &str = "DECISION:";
const FEEDBACK_PREFIX: &str = "FEEDBACK:";

#[derive(Serialize)]
struct EditorPrompt<'a> {
    candidate: &'a str,
    rules: String,
}

/// LLM-backed evaluation provider
pub struct Editor {
    client: Arc<dyn LlmClient>,
    renderer: Arc<PromptRenderer>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl Editor {
    pub fn new(client: Arc<dyn LlmClient>, renderer: Arc<PromptRenderer>) -> Self {
        Self {
            client,
            renderer,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set max tokens per review
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn build_request(&self, request: &EvaluationRequest) -> Result<CompletionRequest, AgentError> {
        let prompt = EditorPrompt {
            candidate: &request.candidate_text,
            rules: request.rules.numbered(),
        };

        let system = self
            .renderer
            .render(EDITOR_SYSTEM, &prompt)
            .map_err(|e| AgentError::Prompt(e.to_string()))?;
        let user = self
            .renderer
            .render(EDITOR_REVIEW, &prompt)
            .map_err(|e| AgentError::Prompt(e.to_string()))?;

        let mut completion = CompletionRequest::new(system).with_user_message(user);
        completion.max_tokens = self.max_tokens;
        completion.temperature = self.temperature;
        Ok(completion)
    }
}

#[async_trait]
impl EvaluationProvider for Editor {
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<Evaluation, AgentError> {
        let completion = self.build_request(request)?;
        debug!("Editor: reviewing {} chars against {} rule(s)", request.candidate_text.len(), request.rules.len());

        let response = self.client.complete(completion).await?;
        parse_review(&response.content)
    }
}

/// Value after `prefix` on a line, ignoring markdown emphasis around the label
fn field<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let line = line.trim().trim_start_matches(['*', '#', '-', ' ']);
    let rest = line.strip_prefix(prefix)?;
    Some(rest.trim_start_matches('*').trim())
}

/// Parse an Editor reply into an evaluation.
///
/// An empty `FEEDBACK:` line takes its text from the next non-blank line.
pub fn parse_review(response: &str) -> Result<Evaluation, AgentError> {
    let mut decision: Option<String> = None;
    let mut feedback: Option<String> = None;

    let mut lines = response.lines().peekable();
    while let Some(line) = lines.next() {
        if let Some(value) = field(line, DECISION_PREFIX) {
            decision = Some(value.trim_matches(['[', ']', '.', '*', ' ']).to_uppercase());
        } else if let Some(value) = field(line, FEEDBACK_PREFIX) {
            if !value.is_empty() {
                feedback = Some(value.to_string());
                continue;
            }
            while lines.peek().is_some_and(|next| next.trim().is_empty()) {
                lines.next();
            }
            if let Some(next) = lines.next_if(|next| field(next, DECISION_PREFIX).is_none()) {
                feedback = Some(next.trim().to_string());
            }
        }
    }

    let decision = decision.ok_or_else(|| {
        AgentError::MalformedReview(format!("no {} line in reply: {}", DECISION_PREFIX, truncate(response, 100)))
    })?;

    match decision.as_str() {
        "APPROVED" => Ok(Evaluation::approved()),
        "REJECTED" => match feedback.filter(|f| !f.is_empty()) {
            Some(feedback) => Ok(Evaluation::rejected(feedback)),
            None => Err(AgentError::MalformedReview("rejection without feedback".to_string())),
        },
        other => Err(AgentError::MalformedReview(format!("unknown decision '{}'", other))),
    }
}

/// Truncate text for error messages.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
