//! Session outcome types.
//!
//! A session ends exactly once, either approved or out of retries.

use serde::{Deserialize, Serialize};

use super::attempt::AttemptRecord;
use super::history::AttemptHistory;

/// How a session terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The Editor approved the final attempt
    Approved,
    /// The rejection budget ran out; the final attempt is the last rejected draft
    RetriesExhausted,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeStatus::Approved => "approved",
            OutcomeStatus::RetriesExhausted => "retries_exhausted",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal result of a session, along with the history it was reached by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalOutcome {
    pub status: OutcomeStatus,
    pub final_attempt: AttemptRecord,
    pub history: AttemptHistory,
}

impl FinalOutcome {
    pub fn is_approved(&self) -> bool {
        self.status == OutcomeStatus::Approved
    }

    /// Total generate+evaluate rounds the session ran
    pub fn attempt_count(&self) -> usize {
        self.history.len()
    }

    /// Feedback the final attempt was rejected with, if it was
    pub fn outstanding_feedback(&self) -> Option<&str> {
        match self.status {
            OutcomeStatus::Approved => None,
            OutcomeStatus::RetriesExhausted => self.final_attempt.feedback.as_deref(),
        }
    }
}
