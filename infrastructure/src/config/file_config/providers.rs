//! Provider configuration from TOML (`[providers.*]` sections)

use super::{ConfigIssue, Severity};
use boardroom_domain::ProviderKind;
use serde::{Deserialize, Serialize};
use std::env;

/// Pick the direct key if set, otherwise read `api_key_env`
fn resolve_api_key(api_key: Option<&str>, api_key_env: &str) -> Option<String> {
    api_key
        .map(str::to_string)
        .or_else(|| env::var(api_key_env).ok())
        .filter(|key| !key.trim().is_empty())
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1000,
            timeout_secs: 60,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

/// xAI API provider configuration (OpenAI-compatible chat completions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileXaiConfig {
    /// Environment variable name for the API key (default: "XAI_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for FileXaiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "XAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.x.ai".to_string(),
            model: "grok-2-vision-1212".to_string(),
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

impl FileXaiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 1000,
            timeout_secs: 60,
            api_version: "2023-06-01".to_string(),
        }
    }
}

impl FileAnthropicConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

/// Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

impl FileGeminiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
    pub anthropic: FileAnthropicConfig,
    pub xai: FileXaiConfig,
    pub gemini: FileGeminiConfig,
}

impl FileProvidersConfig {
    /// `(provider, api_key_env)` of every provider whose key cannot be resolved
    pub fn missing_keys(&self) -> Vec<(ProviderKind, &str)> {
        let mut missing = Vec::new();
        if self.openai.resolve_api_key().is_none() {
            missing.push((ProviderKind::OpenAi, self.openai.api_key_env.as_str()));
        }
        if self.anthropic.resolve_api_key().is_none() {
            missing.push((ProviderKind::Anthropic, self.anthropic.api_key_env.as_str()));
        }
        if self.xai.resolve_api_key().is_none() {
            missing.push((ProviderKind::Xai, self.xai.api_key_env.as_str()));
        }
        if self.gemini.resolve_api_key().is_none() {
            missing.push((ProviderKind::Gemini, self.gemini.api_key_env.as_str()));
        }
        missing
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.missing_keys()
            .into_iter()
            .map(|(kind, env_name)| {
                ConfigIssue::new(
                    Severity::Warning,
                    format!("providers.{}", kind),
                    format!(
                        "no API key (set {} or providers.{}.api_key); personas bound to {} will answer with an error",
                        env_name, kind, kind
                    ),
                )
            })
            .collect()
    }
}
