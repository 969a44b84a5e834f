//! Runtime configuration.
//!
//! Precedence, lowest first: defaults, an optional YAML file, `.env`, then
//! process environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Largest page GitHub's commit listing accepts.
const MAX_COMMIT_PAGE_SIZE: u32 = 100;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source-control provider settings.
    pub github: GitHubConfig,
    /// Language-model settings.
    pub llm: LlmConfig,
    /// Interactive chat settings.
    pub chat: ChatConfig,
}

/// Source-control provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_url: String,
    /// Host accepted in repository URLs.
    pub host: String,
    /// Personal access token sent as a bearer credential.
    pub token: Option<String>,
    /// Number of recent commits fetched per load.
    pub commit_page_size: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".into(),
            host: "github.com".into(),
            token: None,
            commit_page_size: 30,
        }
    }
}

/// Which completion API answers chat questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic messages API.
    Anthropic,
    /// OpenAI chat completions API.
    #[default]
    OpenAi,
}

impl LlmProvider {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            other => Err(Error::Config(format!(
                "unknown LLM provider '{other}' (expected 'anthropic' or 'openai')"
            ))),
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-20250514",
            Self::OpenAi => "gpt-4",
        }
    }

    fn key_variable(self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// Language-model settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Completion provider.
    pub provider: LlmProvider,
    /// Model name; the provider's default when unset.
    pub model: Option<String>,
    /// Completion length cap.
    pub max_tokens: u32,
    /// Provider API key.
    pub api_key: Option<String>,
    /// Endpoint override, mainly for proxies.
    pub api_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: None,
            max_tokens: 512,
            api_key: None,
            api_url: None,
        }
    }
}

impl LlmConfig {
    /// The configured model, or the provider's default.
    #[must_use]
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or_else(|| self.provider.default_model())
    }
}

/// Interactive chat settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Pause between revealed words, in milliseconds.
    pub reveal_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { reveal_delay_ms: 25 }
    }
}

impl Config {
    /// Reads a YAML configuration file; missing sections keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))
    }

    /// Builds the effective configuration for a command.
    ///
    /// Loads `.env` from the working directory if present; variables already
    /// set in the environment win over it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unreadable file, an unparseable
    /// variable, or an out-of-range value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!(path = %env_file.display(), "loaded .env");
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a numeric or provider variable does not parse.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("GITHUB_API_URL") {
            self.github.api_url = url;
        }
        if let Some(host) = lookup("GITHUB_HOST") {
            self.github.host = host;
        }
        if let Some(token) = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
            self.github.token = Some(token);
        }
        if let Some(size) = lookup("SAHAYATRI_COMMIT_PAGE_SIZE") {
            self.github.commit_page_size = parse_number("SAHAYATRI_COMMIT_PAGE_SIZE", &size)?;
        }

        if let Some(provider) = lookup("SAHAYATRI_LLM_PROVIDER") {
            self.llm.provider = LlmProvider::parse(&provider)?;
        }
        if let Some(model) = lookup("SAHAYATRI_MODEL") {
            self.llm.model = Some(model);
        }
        if let Some(max) = lookup("SAHAYATRI_MAX_TOKENS") {
            self.llm.max_tokens = parse_number("SAHAYATRI_MAX_TOKENS", &max)?;
        }
        if let Some(url) = lookup("SAHAYATRI_LLM_API_URL") {
            self.llm.api_url = Some(url);
        }
        // only the chosen provider's key applies
        if let Some(key) = lookup(self.llm.provider.key_variable()).filter(|k| !k.is_empty()) {
            self.llm.api_key = Some(key);
        }

        if let Some(delay) = lookup("SAHAYATRI_REVEAL_DELAY_MS") {
            self.chat.reveal_delay_ms = parse_number("SAHAYATRI_REVEAL_DELAY_MS", &delay)?;
        }
        Ok(())
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid key.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_COMMIT_PAGE_SIZE).contains(&self.github.commit_page_size) {
            return Err(Error::Config(format!(
                "github.commit_page_size must be between 1 and {MAX_COMMIT_PAGE_SIZE}, got {}",
                self.github.commit_page_size
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(Error::Config("llm.max_tokens must be greater than 0".into()));
        }
        if self.github.host.trim().is_empty() {
            return Err(Error::Config("github.host must not be empty".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a number, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_public_github() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.host, "github.com");
        assert_eq!(config.github.commit_page_size, 30);
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.model(), "gpt-4");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "github:\n  commit_page_size: 10\nllm:\n  provider: anthropic\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.github.commit_page_size, 10);
        assert_eq!(config.github.host, "github.com");
        assert_eq!(config.llm.model(), "claude-sonnet-4-20250514");
        assert_eq!(config.chat.reveal_delay_ms, 25);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("GITHUB_TOKEN", "ghp_x"),
                ("SAHAYATRI_LLM_PROVIDER", "Anthropic"),
                ("ANTHROPIC_API_KEY", "sk-ant"),
                ("OPENAI_API_KEY", "sk-openai"),
                ("SAHAYATRI_COMMIT_PAGE_SIZE", "5"),
            ]))
            .unwrap();

        assert_eq!(config.github.token.as_deref(), Some("ghp_x"));
        assert_eq!(config.llm.provider, LlmProvider::Anthropic);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-ant"));
        assert_eq!(config.github.commit_page_size, 5);
    }

    #[test]
    fn empty_token_is_ignored() {
        let mut config = Config::default();
        config.apply_env(env(&[("GITHUB_TOKEN", "")])).unwrap();
        assert!(config.github.token.is_none());
    }

    #[test]
    fn bad_values_are_config_errors() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[("SAHAYATRI_MAX_TOKENS", "lots")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = config.apply_env(env(&[("SAHAYATRI_LLM_PROVIDER", "bard")])).unwrap_err();
        assert!(err.to_string().contains("unknown LLM provider"));

        config.github.commit_page_size = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::from_file(Path::new("/no/such/sahayatri.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
