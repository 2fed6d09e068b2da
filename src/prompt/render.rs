//! Prompt Renderer - Render templates with context variables using Handlebars
//!
//! The renderer comes preloaded with the Creator and Editor templates.

use handlebars::Handlebars;
use serde::Serialize;

use super::templates::BUILTIN;
use crate::error::{CopyloopError, Result};

/// Renders prompt templates using Handlebars templating
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl PromptRenderer {
    /// Create a renderer with the built-in templates registered
    pub fn new() -> Result<Self> {
        let mut renderer = Self::empty();
        for (name, template) in BUILTIN {
            renderer.register_template(name, template)?;
        }
        Ok(renderer)
    }

    /// Create a renderer with no templates registered
    pub fn empty() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Prompts are plain text; never HTML-escape
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Register a named template, replacing any template of the same name
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| CopyloopError::Template(format!("Failed to register template '{}': {}", name, e)))
    }

    /// Render a registered template with any serializable context
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(name, context)
            .map_err(|e| CopyloopError::Template(format!("Failed to render template '{}': {}", name, e)))
    }

    /// Check if a named template is registered
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.get_template(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::templates::*;
    use serde_json::json;

    #[test]
    fn test_builtin_templates_registered() {
        let renderer = PromptRenderer::new().unwrap();
        for name in [CREATOR_SYSTEM, CREATOR_FIRST_DRAFT, CREATOR_REVISION, EDITOR_SYSTEM, EDITOR_REVIEW] {
            assert!(renderer.has_template(name), "missing {}", name);
        }
    }

    #[test]
    fn test_empty_renderer() {
        let renderer = PromptRenderer::empty();
        assert!(!renderer.has_template(CREATOR_FIRST_DRAFT));
    }

    #[test]
    fn test_render_first_draft() {
        let renderer = PromptRenderer::new().unwrap();
        let prompt = renderer
            .render(
                CREATOR_FIRST_DRAFT,
                &json!({ "product": "Wireless Earbuds", "audience": "Commuters" }),
            )
            .unwrap();

        assert!(prompt.contains("'Wireless Earbuds'"));
        assert!(prompt.contains("Target audience: Commuters."));
        assert!(prompt.contains("Output ONLY the caption text."));
    }

    #[test]
    fn test_render_revision_lists_every_rejection() {
        let renderer = PromptRenderer::new().unwrap();
        let prompt = renderer
            .render(
                CREATOR_REVISION,
                &json!({
                    "product": "Wireless Earbuds",
                    "audience": "Commuters",
                    "rejections": [
                        { "number": 1, "draft": "Buy earbuds", "feedback": "too generic" },
                        { "number": 2, "draft": "Earbuds #deal", "feedback": "no hashtags" }
                    ],
                    "latest_feedback": "no hashtags"
                }),
            )
            .unwrap();

        assert!(prompt.contains("1. Draft: \"Buy earbuds\""));
        assert!(prompt.contains("Feedback: too generic"));
        assert!(prompt.contains("2. Draft: \"Earbuds #deal\""));
        assert!(prompt.contains("Most Recent Feedback: no hashtags"));
        assert!(prompt.find("too generic").unwrap() < prompt.find("2. Draft").unwrap());
    }

    #[test]
    fn test_render_does_not_escape() {
        let renderer = PromptRenderer::new().unwrap();
        let prompt = renderer
            .render(EDITOR_REVIEW, &json!({ "candidate": "Sound & style <3", "rules": "1. Be short" }))
            .unwrap();
        assert!(prompt.contains("\"Sound & style <3\""));
        assert!(prompt.contains("1. Be short"));
        assert!(prompt.contains("DECISION: [APPROVED or REJECTED]"));
    }

    #[test]
    fn test_register_override() {
        let mut renderer = PromptRenderer::new().unwrap();
        renderer.register_template(CREATOR_SYSTEM, "Be {{tone}}.").unwrap();
        let prompt = renderer.render(CREATOR_SYSTEM, &json!({ "tone": "bold" })).unwrap();
        assert_eq!(prompt, "Be bold.");
    }

    #[test]
    fn test_register_invalid_template() {
        let mut renderer = PromptRenderer::empty();
        let err = renderer.register_template("broken", "{{#each items}}").unwrap_err();
        assert!(matches!(err, CopyloopError::Template(_)));
    }

    #[test]
    fn test_render_unknown_template() {
        let renderer = PromptRenderer::empty();
        let err = renderer.render("nonexistent", &json!({})).unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
    }
}
