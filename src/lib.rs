//! Copyloop - a Creator/Editor refinement loop for short-form ad copy
//!
//! One model drafts copy, a second reviews it against a fixed rule set, and
//! every rejection is fed back to the drafter until the copy is approved or
//! the retry budget runs out.

pub mod agents;
pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod report;
pub mod runner;

pub use error::{CopyloopError, Result};
