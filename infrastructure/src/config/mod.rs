//! Configuration file loading for boardroom
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `BOARDROOM_*` (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./boardroom.toml` or `./.boardroom.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/boardroom/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAnthropicConfig, FileBotConfig, FileConfig, FileDiscussionConfig,
    FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig, FileReplConfig, FileXaiConfig,
    Severity,
};
pub use loader::{ConfigError, ConfigLoader};
