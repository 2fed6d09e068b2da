//! The refinement loop.
//!
//! Each round asks the Creator for a draft, asks the Editor to review it and
//! commits the pair as an `AttemptRecord`. Rejections are fed back to the
//! Creator in full on every following round. The session stops on the first
//! approval, or once the rejection budget is spent.

use std::sync::Arc;

use log::{debug, info, warn};

use super::observer::{AttemptObserver, NoOpObserver};
use crate::agents::{EvaluationProvider, EvaluationRequest, GenerationProvider, GenerationRequest};
use crate::domain::{AttemptHistory, AttemptRecord, FinalOutcome, OutcomeStatus, RuleSet, SessionContext};
use crate::error::{CopyloopError, Result};

/// Runs Creator/Editor sessions.
///
/// Holds no per-session state; every call to `run` starts a fresh history.
pub struct RefinementLoop<G, E>
where
    G: GenerationProvider + ?Sized,
    E: EvaluationProvider + ?Sized,
{
    /// Produces candidates
    creator: Arc<G>,
    /// Reviews candidates
    editor: Arc<E>,
    /// Rules every review is run against
    rules: RuleSet,
    /// Told about each committed attempt
    observer: Arc<dyn AttemptObserver>,
}

impl<G, E> RefinementLoop<G, E>
where
    G: GenerationProvider + ?Sized,
    E: EvaluationProvider + ?Sized,
{
    pub fn new(creator: Arc<G>, editor: Arc<E>, rules: RuleSet) -> Self {
        Self {
            creator,
            editor,
            rules,
            observer: Arc::new(NoOpObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn AttemptObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run one session to completion.
    ///
    /// At least one round always happens. `max_retries` is the number of
    /// rejected rounds that may be followed by another try, so a session makes
    /// at most `max_retries + 1` rounds. Provider failures abort the session
    /// immediately with the round they happened on; that round leaves no record.
    pub async fn run(&self, context: &SessionContext) -> Result<FinalOutcome> {
        let retry_budget = context.max_retries() as usize;
        let mut history = AttemptHistory::new();

        info!(
            "Starting session: product='{}' audience='{}' max_retries={}",
            context.product(),
            context.audience(),
            retry_budget
        );

        loop {
            let index = history.next_index();
            self.observer.on_round_start(index);

            // 1. Full rejection history, never a window
            let rejections: Vec<AttemptRecord> = history.rejection_view().into_iter().cloned().collect();
            let request = GenerationRequest::new(context, rejections);
            debug!(
                "Round {}: requesting draft with {} prior rejection(s)",
                index,
                request.rejections.len()
            );

            // 2. Creator
            let candidate = self.creator.generate(&request).await.map_err(|e| {
                warn!("Round {}: generation failed: {}", index, e);
                CopyloopError::Generation {
                    round: index,
                    message: e.to_string(),
                }
            })?;

            // 3. Editor
            let review = EvaluationRequest::new(candidate.as_str(), &self.rules);
            let evaluation = self.editor.evaluate(&review).await.map_err(|e| {
                warn!("Round {}: evaluation failed: {}", index, e);
                CopyloopError::Evaluation {
                    round: index,
                    message: e.to_string(),
                }
            })?;
            evaluation.validate().map_err(|message| CopyloopError::Evaluation { round: index, message })?;

            // 4. Commit, then decide
            let record = AttemptRecord::new(index, candidate, evaluation);
            history.append(record.clone());
            self.observer.on_attempt(&record);
            info!("Round {}: {}", index, record.verdict);

            if record.is_approved() {
                return Ok(FinalOutcome {
                    status: OutcomeStatus::Approved,
                    final_attempt: record,
                    history,
                });
            }

            if history.rejected_count() > retry_budget {
                info!("Retry budget of {} exhausted after {} round(s)", retry_budget, history.len());
                return Ok(FinalOutcome {
                    status: OutcomeStatus::RetriesExhausted,
                    final_attempt: record,
                    history,
                });
            }
        }
    }
}
