//! Console trace of a running session.
//!
//! Everything goes to stderr so stdout stays a single JSON document.

use colored::*;

use crate::domain::{AttemptRecord, Verdict};
use crate::runner::AttemptObserver;

/// Prints each round as it is committed
#[derive(Debug, Default)]
pub struct ConsoleTrace;

impl ConsoleTrace {
    pub fn new() -> Self {
        Self
    }

    /// Lines printed for one committed attempt
    fn lines(record: &AttemptRecord) -> Vec<String> {
        let mut lines = vec![
            format!("{} generated draft #{}:", "CREATOR".cyan().bold(), record.index + 1),
            format!("  \"{}\"", record.candidate_text),
        ];

        let verdict = match record.verdict {
            Verdict::Approved => record.verdict.as_str().green().bold(),
            Verdict::Rejected => record.verdict.as_str().red().bold(),
        };
        lines.push(format!("{} review: {}", "EDITOR".magenta().bold(), verdict));

        if let Some(feedback) = &record.feedback {
            lines.push(format!("  Feedback: {}", feedback));
        }
        lines
    }
}

impl AttemptObserver for ConsoleTrace {
    fn on_round_start(&self, index: usize) {
        eprintln!("{}", format!("--- Round {} ---", index + 1).dimmed());
    }

    fn on_attempt(&self, record: &AttemptRecord) {
        for line in Self::lines(record) {
            eprintln!("{}", line);
        }
    }
}
