//! Runner module - the Creator/Editor refinement loop.
//!
//! This module provides:
//! - RefinementLoop for running a session
//! - AttemptObserver hooks for progress reporting

pub mod observer;
mod refinement;

pub use observer::{AttemptObserver, NoOpObserver};
pub use refinement::RefinementLoop;
