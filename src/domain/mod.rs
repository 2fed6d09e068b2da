//! Domain types for Copyloop
//!
//! - SessionContext: product, audience and rejection budget for one session
//! - AttemptRecord / Evaluation / Verdict: one generate-then-evaluate round
//! - AttemptHistory: the append-only record of a session's rounds
//! - FinalOutcome / OutcomeStatus: how a session ended
//! - RuleSet: what the Editor checks a candidate against

pub mod attempt;
pub mod history;
pub mod outcome;
pub mod rules;
pub mod session;

pub use attempt::{AttemptRecord, Evaluation, Verdict};
pub use history::AttemptHistory;
pub use outcome::{FinalOutcome, OutcomeStatus};
pub use rules::RuleSet;
pub use session::{DEFAULT_AUDIENCE, DEFAULT_MAX_RETRIES, DEFAULT_PRODUCT, SessionContext};
