//! Append-only history of a session's attempts.

use serde::{Deserialize, Serialize};

use super::attempt::AttemptRecord;

/// Ordered attempts of one session. Records can be appended and read, never
/// removed or changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptHistory {
    records: Vec<AttemptRecord>,
}

impl AttemptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed record. Its index must be the next free slot.
    pub fn append(&mut self, record: AttemptRecord) {
        debug_assert_eq!(record.index, self.records.len(), "attempt index out of order");
        self.records.push(record);
    }

    /// Rejected attempts, in the order they happened
    pub fn rejection_view(&self) -> Vec<&AttemptRecord> {
        self.records.iter().filter(|r| r.is_rejected()).collect()
    }

    pub fn rejected_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_rejected()).count()
    }

    /// Index the next appended record will take
    pub fn next_index(&self) -> usize {
        self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&AttemptRecord> {
        self.records.last()
    }

    pub fn get(&self, index: usize) -> Option<&AttemptRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttemptRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a AttemptHistory {
    type Item = &'a AttemptRecord;
    type IntoIter = std::slice::Iter<'a, AttemptRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Evaluation;

    fn rejected(index: usize, feedback: &str) -> AttemptRecord {
        AttemptRecord::new(index, format!("draft {}", index), Evaluation::rejected(feedback))
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = AttemptHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.next_index(), 0);
        assert!(history.last().is_none());
        assert!(history.rejection_view().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = AttemptHistory::new();
        history.append(rejected(0, "too generic"));
        history.append(rejected(1, "no emoji"));

        let indices: Vec<usize> = history.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(history.next_index(), 2);
        assert_eq!(history.last().map(|r| r.index), Some(1));
    }

    #[test]
    fn test_rejection_view_filters_approved() {
        let mut history = AttemptHistory::new();
        history.append(rejected(0, "too generic"));
        history.append(rejected(1, "has hashtags"));
        history.append(AttemptRecord::new(2, "final", Evaluation::approved()));

        let view = history.rejection_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].feedback.as_deref(), Some("too generic"));
        assert_eq!(view[1].feedback.as_deref(), Some("has hashtags"));
        assert_eq!(history.rejected_count(), 2);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut history = AttemptHistory::new();
        history.append(rejected(0, "too long"));
        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["feedback"], "too long");

        let restored: AttemptHistory = serde_json::from_value(json).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn test_get() {
        let mut history = AttemptHistory::new();
        history.append(rejected(0, "x"));
        assert!(history.get(0).is_some());
        assert!(history.get(1).is_none());
    }
}
