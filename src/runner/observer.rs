//! Hooks for watching a session as it runs.

use crate::domain::AttemptRecord;

/// Notified by the refinement loop. `on_attempt` only fires for committed
/// records; a round whose provider failed is never reported.
pub trait AttemptObserver: Send + Sync {
    /// A round is about to ask the Creator for a draft
    fn on_round_start(&self, _index: usize) {}

    /// A round finished and its record was appended to the history
    fn on_attempt(&self, record: &AttemptRecord);
}

/// Observer that ignores everything
pub struct NoOpObserver;

impl AttemptObserver for NoOpObserver {
    fn on_attempt(&self, _record: &AttemptRecord) {}
}
