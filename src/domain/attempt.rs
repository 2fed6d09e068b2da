//! Attempt records and editor verdicts
//!
//! An `AttemptRecord` is the immutable result of one generate-then-evaluate
//! round. It only exists once both halves of the round have completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Editor decision on a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "APPROVED",
            Verdict::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an evaluation provider hands back. A rejection always carries its
/// feedback; an approval never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Approved,
    Rejected { feedback: String },
}

impl Evaluation {
    pub fn approved() -> Self {
        Evaluation::Approved
    }

    pub fn rejected(feedback: impl Into<String>) -> Self {
        Evaluation::Rejected {
            feedback: feedback.into(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self {
            Evaluation::Approved => Verdict::Approved,
            Evaluation::Rejected { .. } => Verdict::Rejected,
        }
    }

    pub fn feedback(&self) -> Option<&str> {
        match self {
            Evaluation::Approved => None,
            Evaluation::Rejected { feedback } => Some(feedback),
        }
    }

    /// Check the shape of a verdict at the provider boundary.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Evaluation::Rejected { feedback } if feedback.trim().is_empty() => {
                Err("rejection carried no feedback".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// One committed round of the refinement loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 0-based position in the session history
    pub index: usize,

    /// Copy produced by the Creator
    pub candidate_text: String,

    /// Editor decision
    pub verdict: Verdict,

    /// Editor feedback, present iff rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Build a record from a completed round
    pub fn new(index: usize, candidate_text: impl Into<String>, evaluation: Evaluation) -> Self {
        let (verdict, feedback) = match evaluation {
            Evaluation::Approved => (Verdict::Approved, None),
            Evaluation::Rejected { feedback } => (Verdict::Rejected, Some(feedback)),
        };

        Self {
            index,
            candidate_text: candidate_text.into(),
            verdict,
            feedback,
            created_at: Utc::now(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.verdict == Verdict::Approved
    }

    pub fn is_rejected(&self) -> bool {
        self.verdict == Verdict::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Approved.to_string(), "APPROVED");
        assert_eq!(Verdict::Rejected.to_string(), "REJECTED");
    }

    #[test]
    fn test_verdict_serialization() {
        assert_eq!(serde_json::to_string(&Verdict::Approved).unwrap(), "\"approved\"");
        assert_eq!(serde_json::to_string(&Verdict::Rejected).unwrap(), "\"rejected\"");
    }

    #[test]
    fn test_evaluation_accessors() {
        let approved = Evaluation::approved();
        assert_eq!(approved.verdict(), Verdict::Approved);
        assert!(approved.feedback().is_none());

        let rejected = Evaluation::rejected("too generic");
        assert_eq!(rejected.verdict(), Verdict::Rejected);
        assert_eq!(rejected.feedback(), Some("too generic"));
    }

    #[test]
    fn test_evaluation_validate() {
        assert!(Evaluation::approved().validate().is_ok());
        assert!(Evaluation::rejected("needs an emoji").validate().is_ok());
        assert!(Evaluation::rejected("  ").validate().is_err());
    }

    #[test]
    fn test_record_from_approval_has_no_feedback() {
        let record = AttemptRecord::new(1, "Crisp sound for the ride 🎧", Evaluation::approved());
        assert_eq!(record.index, 1);
        assert!(record.is_approved());
        assert!(record.feedback.is_none());
    }

    #[test]
    fn test_record_from_rejection_keeps_feedback() {
        let record = AttemptRecord::new(0, "Buy earbuds #sale", Evaluation::rejected("no hashtags"));
        assert!(record.is_rejected());
        assert_eq!(record.feedback.as_deref(), Some("no hashtags"));
    }

    #[test]
    fn test_record_json_skips_missing_feedback() {
        let record = AttemptRecord::new(0, "Fish oil, fresh focus 🐟", Evaluation::approved());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["verdict"], "approved");
        assert!(json.get("feedback").is_none());
    }
}
