use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{DEFAULT_AUDIENCE, DEFAULT_MAX_RETRIES, DEFAULT_PRODUCT, RuleSet};
use crate::error::{CopyloopError, Result};
use crate::llm::{anthropic, gemini};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub llm: LlmConfig,
    pub session: SessionConfig,
    pub rules: RuleSet,
}

/// Which backend serves both roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Anthropic,
}

impl Provider {
    /// Environment variables checked for this provider's key, in order
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
            Provider::Anthropic => &["ANTHROPIC_API_KEY"],
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => gemini::DEFAULT_MODEL,
            Provider::Anthropic => anthropic::DEFAULT_MODEL,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::Anthropic => write!(f, "anthropic"),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Provider,
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            max_tokens: 1024,
            temperature: gemini::DEFAULT_TEMPERATURE,
            timeout_ms: 120000,
            api_key: None,
            base_url: None,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_ms", &self.timeout_ms)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl LlmConfig {
    /// Model to use, falling back to the provider default
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    /// Find the API key: provider environment variables first, then the
    /// config file. A missing key is fatal.
    pub fn resolve_api_key(&self) -> Result<String> {
        let vars = self.provider.api_key_env_vars();

        let from_env = vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty());

        from_env
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                CopyloopError::Configuration(format!(
                    "no API key for provider '{}': set {} or llm.api_key in the config file",
                    self.provider,
                    vars.join(" or ")
                ))
            })
    }
}

/// Session defaults, overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub product: String,
    pub audience: String,
    pub max_retries: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            product: DEFAULT_PRODUCT.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            llm: LlmConfig::default(),
            session: SessionConfig::default(),
            rules: RuleSet::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// The first file that exists is used. A file that exists but cannot be
    /// read or parsed is an error, never skipped.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_checked(path);
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Self::load_first(&candidates)
    }

    /// Load the first existing file among `candidates`, or defaults if none exist
    fn load_first(candidates: &[PathBuf]) -> Result<Self> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::load_checked(path),
            None => {
                info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_checked(path: &Path) -> Result<Self> {
        Self::load_from_file(path).map_err(|e| {
            warn!("Failed to load config from {}: {}", path.display(), e);
            CopyloopError::Configuration(format!("failed to load config from {}: {}", path.display(), e))
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;

        let config: Self = serde_yaml::from_str(&content)?;

        info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    /// Clear provider key variables for the duration of a test
    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn clear(vars: &[&'static str]) -> Self {
            let saved = vars.iter().map(|v| (*v, std::env::var(v).ok())).collect();
            for var in vars {
                // SAFETY: env-touching tests are #[serial]
                unsafe {
                    std::env::remove_var(var);
                }
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (var, value) in &self.saved {
                // SAFETY: env-touching tests are #[serial]
                unsafe {
                    match value {
                        Some(v) => std::env::set_var(var, v),
                        None => std::env::remove_var(var),
                    }
                }
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.provider, Provider::Gemini);
        assert_eq!(config.llm.resolved_model(), "gemini-2.5-flash");
        assert_eq!(config.session.product, DEFAULT_PRODUCT);
        assert_eq!(config.session.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.rules.len(), 4);
    }

    #[test]
    fn test_load_from_file_partial() {
        let file = write_config(
            r#"
llm:
  provider: anthropic
  temperature: 0.2
session:
  product: Wireless Earbuds
rules:
  - Must be under 10 words.
"#,
        );

        let config = Config::load_from_file(file.path()).unwrap();

        assert_eq!(config.llm.provider, Provider::Anthropic);
        assert_eq!(config.llm.resolved_model(), anthropic::DEFAULT_MODEL);
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.session.product, "Wireless Earbuds");
        assert_eq!(config.session.audience, DEFAULT_AUDIENCE);
        assert_eq!(config.rules.rules(), ["Must be under 10 words."]);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let file = write_config("llm:\n  provider: openai\n");
        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, CopyloopError::Yaml(_)));
    }

    #[test]
    fn test_explicit_missing_path_is_configuration_error() {
        let path = PathBuf::from("/nonexistent/copyloop.yml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CopyloopError::Configuration(_)));
        assert!(err.to_string().contains("/nonexistent/copyloop.yml"));
    }

    #[test]
    fn test_load_first_uses_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yml");
        let present = dir.path().join("copyloop.yml");
        std::fs::write(&present, "session:\n  max_retries: 1\n").unwrap();

        let config = Config::load_first(&[missing, present]).unwrap();
        assert_eq!(config.session.max_retries, 1);
    }

    #[test]
    fn test_load_first_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_first(&[dir.path().join("missing.yml")]).unwrap();
        assert_eq!(config.session.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_load_first_broken_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("copyloop.yml");
        std::fs::write(&broken, "llm:\n  api_key: file-key\n  provider: [oops\n").unwrap();
        let later = dir.path().join("later.yml");
        std::fs::write(&later, "session:\n  max_retries: 1\n").unwrap();

        let err = Config::load_first(&[broken, later]).unwrap_err();
        assert!(matches!(err, CopyloopError::Configuration(_)));
        let message = err.to_string();
        assert!(message.contains("copyloop.yml"));
        assert!(message.contains("YAML error"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LlmConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    #[serial]
    fn test_resolve_api_key_from_env() {
        let _guard = EnvGuard::clear(&["GOOGLE_API_KEY", "GEMINI_API_KEY"]);
        // SAFETY: serial test, restored by the guard
        unsafe {
            std::env::set_var("GEMINI_API_KEY", "env-key");
        }

        let config = LlmConfig {
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "env-key");
    }

    #[test]
    #[serial]
    fn test_resolve_api_key_from_file() {
        let _guard = EnvGuard::clear(&["ANTHROPIC_API_KEY"]);

        let config = LlmConfig {
            provider: Provider::Anthropic,
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().unwrap(), "file-key");
    }

    #[test]
    #[serial]
    fn test_resolve_api_key_missing() {
        let _guard = EnvGuard::clear(&["GOOGLE_API_KEY", "GEMINI_API_KEY"]);

        let err = LlmConfig::default().resolve_api_key().unwrap_err();
        assert!(matches!(err, CopyloopError::Configuration(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }
}
