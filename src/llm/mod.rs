//! LLM Client Layer - Gemini and Anthropic backends behind one trait
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - GeminiClient and AnthropicClient implementations
//! - MockLlmClient for scripted tests
//! - create_client to pick a backend from configuration

pub mod anthropic;
pub mod client;
pub mod error;
pub mod gemini;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use log::debug;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use client::{LlmClient, MockLlmClient};
pub use error::LlmError;
pub use gemini::{GeminiClient, GeminiConfig};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, Usage};

use crate::config::{LlmConfig, Provider};

/// Create an LLM client for the configured provider
pub fn create_client(config: &LlmConfig, api_key: String) -> Result<Arc<dyn LlmClient>, LlmError> {
    let model = config.resolved_model();
    let timeout = Duration::from_millis(config.timeout_ms);
    debug!("create_client: provider={} model={}", config.provider, model);

    match config.provider {
        Provider::Gemini => {
            let mut gemini = GeminiConfig {
                model,
                max_tokens: config.max_tokens,
                temperature: config.temperature,
                timeout,
                ..Default::default()
            };
            if let Some(base_url) = &config.base_url {
                gemini.base_url = base_url.clone();
            }
            Ok(Arc::new(GeminiClient::with_api_key(api_key, gemini)?))
        }
        Provider::Anthropic => {
            let mut anthropic = AnthropicConfig {
                model,
                max_tokens: config.max_tokens,
                temperature: Some(config.temperature),
                timeout,
                ..Default::default()
            };
            if let Some(base_url) = &config.base_url {
                anthropic.base_url = base_url.clone();
            }
            Ok(Arc::new(AnthropicClient::with_api_key(api_key, anthropic)?))
        }
    }
}
