//! Review rules handed to the Editor.

use serde::{Deserialize, Serialize};

/// Ordered list of rules a candidate must satisfy to be approved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<String>,
}

impl RuleSet {
    pub fn new(rules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render as "1. rule" lines for a prompt
    pub fn numbered(&self) -> String {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("{}. {}", i + 1, rule))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new([
            "Must be under 15 words.",
            "Must contain exactly one emoji.",
            "Must NOT contain hashtags.",
            "Must mention the product name explicitly.",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RuleSet::default();
        assert_eq!(rules.len(), 4);
        assert!(rules.rules()[2].contains("hashtags"));
    }

    #[test]
    fn test_numbered() {
        let rules = RuleSet::new(["Be short", "No hashtags"]);
        assert_eq!(rules.numbered(), "1. Be short\n2. No hashtags");
    }

    #[test]
    fn test_empty() {
        let rules = RuleSet::new(Vec::<String>::new());
        assert!(rules.is_empty());
        assert_eq!(rules.numbered(), "");
    }

    #[test]
    fn test_yaml_is_a_plain_list() {
        let rules: RuleSet = serde_yaml::from_str("- Be short\n- Mention the product\n").unwrap();
        assert_eq!(rules.rules(), ["Be short", "Mention the product"]);
    }
}
