//! Infrastructure layer for boardroom
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer (one HTTP backend per provider), plus
//! configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileBotConfig, FileConfig, FileDiscussionConfig,
    FileProvidersConfig, FileReplConfig, Severity,
};
pub use providers::{
    anthropic::AnthropicBackend, factory::BackendFactory, gemini::GeminiBackend,
    openai::OpenAiCompatibleBackend,
};
