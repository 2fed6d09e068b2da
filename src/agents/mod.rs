//! The two roles of a refinement session.
//!
//! - `GenerationProvider` (the Creator) turns product, audience and past
//!   rejections into a candidate piece of copy.
//! - `EvaluationProvider` (the Editor) judges a candidate against a rule set.
//!
//! Requests are fixed-shape structs; the refinement loop only ever talks to
//! these traits, so the LLM-backed implementations here can be swapped for
//! scripted ones in tests.

pub mod creator;
pub mod editor;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AttemptRecord, Evaluation, RuleSet, SessionContext};
use crate::llm::LlmError;

pub use creator::Creator;
pub use editor::{Editor, parse_review};

/// Errors raised by a provider while producing a candidate or a verdict
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Model returned an empty completion")]
    EmptyCompletion,

    #[error("Malformed review: {0}")]
    MalformedReview(String),

    #[error("Prompt rendering failed: {0}")]
    Prompt(String),

    #[error("{0}")]
    Other(String),
}

/// Everything the Creator sees when drafting a new candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub product: String,
    pub audience: String,
    /// Every rejected attempt so far, oldest first
    pub rejections: Vec<AttemptRecord>,
}

impl GenerationRequest {
    pub fn new(context: &SessionContext, rejections: Vec<AttemptRecord>) -> Self {
        Self {
            product: context.product().to_string(),
            audience: context.audience().to_string(),
            rejections,
        }
    }

    /// True for the opening round of a session
    pub fn is_first_draft(&self) -> bool {
        self.rejections.is_empty()
    }

    /// Feedback texts of all past rejections, oldest first
    pub fn feedback_history(&self) -> Vec<&str> {
        self.rejections.iter().filter_map(|r| r.feedback.as_deref()).collect()
    }

    /// Feedback of the most recent rejection
    pub fn latest_feedback(&self) -> Option<&str> {
        self.rejections.last().and_then(|r| r.feedback.as_deref())
    }
}

/// Everything the Editor sees when reviewing a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub candidate_text: String,
    pub rules: RuleSet,
}

impl EvaluationRequest {
    pub fn new(candidate_text: impl Into<String>, rules: &RuleSet) -> Self {
        Self {
            candidate_text: candidate_text.into(),
            rules: rules.clone(),
        }
    }
}

/// Produces candidate copy
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AgentError>;
}

/// Judges candidate copy
#[async_trait]
pub trait EvaluationProvider: Send + Sync {
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<Evaluation, AgentError>;
}
