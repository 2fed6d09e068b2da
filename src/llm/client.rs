//! LLM client trait and a scripted mock

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::LlmError;
use super::types::{CompletionRequest, CompletionResponse, Usage};

/// Stateless LLM client - each call is independent (fresh context)
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when the request does not override it
    fn model(&self) -> &str;

    /// Whether the client has what it needs to make calls
    fn is_ready(&self) -> bool;

    /// Tokens used by every completion this client has served
    fn total_usage(&self) -> Usage;
}

/// Client that replays scripted responses in order and records what it was
/// asked. Running out of script is reported as an invalid response.
#[derive(Default)]
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    usage: Mutex<Usage>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers with the given texts, one per call
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mock = Self::new();
        for text in texts {
            mock.push_text(text);
        }
        mock
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.push(Ok(CompletionResponse::text(text)));
    }

    pub fn push_response(&self, response: CompletionResponse) {
        self.push(Ok(response));
    }

    pub fn push_error(&self, error: LlmError) {
        self.push(Err(error));
    }

    fn push(&self, response: Result<CompletionResponse, LlmError>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let next = self.responses.lock().ok().and_then(|mut queue| queue.pop_front());
        let response =
            next.unwrap_or_else(|| Err(LlmError::InvalidResponse("mock has no scripted response left".to_string())))?;

        if let Ok(mut total) = self.usage.lock() {
            total.add(&response.usage);
        }
        Ok(response)
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn total_usage(&self) -> Usage {
        self.usage.lock().map(|u| u.clone()).unwrap_or_default()
    }
}
