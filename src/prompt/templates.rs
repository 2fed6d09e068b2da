//! Built-in prompt templates for the two roles.

/// Template names, as registered with the renderer
pub const CREATOR_SYSTEM: &str = "creator_system";
pub const CREATOR_FIRST_DRAFT: &str = "creator_first_draft";
pub const CREATOR_REVISION: &str = "creator_revision";
pub const EDITOR_SYSTEM: &str = "editor_system";
pub const EDITOR_REVIEW: &str = "editor_review";

pub(super) const CREATOR_SYSTEM_TEMPLATE: &str =
    "You are a creative copywriter who writes short social media ad captions.";

pub(super) const CREATOR_FIRST_DRAFT_TEMPLATE: &str = "\
Write a short, punchy social media ad caption for '{{product}}'.
Target audience: {{audience}}.
Output ONLY the caption text.";

pub(super) const CREATOR_REVISION_TEMPLATE: &str = "\
Your previous draft for '{{product}}' was rejected.
Target audience: {{audience}}.

Past Feedback History:
{{#each rejections}}
{{this.number}}. Draft: \"{{this.draft}}\"
   Feedback: {{this.feedback}}
{{/each}}

Most Recent Feedback: {{latest_feedback}}

Please write a NEW caption that fixes these issues and respects ALL past feedback. \
Output ONLY the caption text.";

pub(super) const EDITOR_SYSTEM_TEMPLATE: &str =
    "You are a strict brand editor. You review ad copy against fixed rules and answer in the exact format requested.";

pub(super) const EDITOR_REVIEW_TEMPLATE: &str = "\
Review this ad copy: \"{{candidate}}\"

Check against these rules:
{{rules}}

Respond in EXACTLY this format:
DECISION: [APPROVED or REJECTED]
FEEDBACK: [One sentence explaining the reason if rejected, or \"Good\" if approved]";

/// All built-in templates as (name, source) pairs
pub(super) const BUILTIN: &[(&str, &str)] = &[
    (CREATOR_SYSTEM, CREATOR_SYSTEM_TEMPLATE),
    (CREATOR_FIRST_DRAFT, CREATOR_FIRST_DRAFT_TEMPLATE),
    (CREATOR_REVISION, CREATOR_REVISION_TEMPLATE),
    (EDITOR_SYSTEM, EDITOR_SYSTEM_TEMPLATE),
    (EDITOR_REVIEW, EDITOR_REVIEW_TEMPLATE),
];
