//! Prompt System - Handlebars templates for the Creator and Editor
//!
//! This module holds the built-in prompt templates and the renderer that
//! fills them in.

mod render;
pub mod templates;

pub use render::PromptRenderer;
