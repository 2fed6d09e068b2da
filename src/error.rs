//! Error types for Copyloop
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Copyloop
#[derive(Debug, Error)]
pub enum CopyloopError {
    /// Missing credential, bad config file or malformed session input
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The Creator could not produce a candidate for this round
    #[error("Generation failed on round {round}: {message}")]
    Generation { round: usize, message: String },

    /// The Editor could not produce a verdict for this round
    #[error("Evaluation failed on round {round}: {message}")]
    Evaluation { round: usize, message: String },

    /// Prompt template failed to render
    #[error("Template error: {0}")]
    Template(String),

    /// Session was interrupted by the caller
    #[error("Session cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CopyloopError {
    /// Round index a provider error happened on, if any
    pub fn round(&self) -> Option<usize> {
        match self {
            CopyloopError::Generation { round, .. } | CopyloopError::Evaluation { round, .. } => Some(*round),
            _ => None,
        }
    }

    /// Whether this error was raised by one of the two providers
    pub fn is_provider_error(&self) -> bool {
        self.round().is_some()
    }
}

/// Result type alias for Copyloop operations
pub type Result<T> = std::result::Result<T, CopyloopError>;
