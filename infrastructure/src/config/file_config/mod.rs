//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into domain and application
//! types happens through the `parse_*` helpers, which report problems as
//! [`ConfigIssue`]s instead of failing.

mod bot;
mod discussion;
mod providers;
mod repl;

pub use bot::FileBotConfig;
pub use discussion::FileDiscussionConfig;
pub use providers::{
    FileAnthropicConfig, FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig, FileXaiConfig,
};
pub use repl::FileReplConfig;

use boardroom_application::BehaviorConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `bot.default_language`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Discussion pacing and prompt settings
    pub discussion: FileDiscussionConfig,
    /// Language default and admin allow-list
    pub bot: FileBotConfig,
    /// Per-provider API settings
    pub providers: FileProvidersConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.discussion.validate());
        issues.extend(self.bot.parse_language().1);
        issues.extend(self.providers.validate());
        issues
    }

    /// Application behavior derived from this configuration
    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig {
            pacing: self.discussion.pacing(),
            mode_timeout: self.discussion.mode_timeout(),
            context_window: self.discussion.context_window.max(1),
            default_language: self.bot.parse_language().0,
            default_depth: self.discussion.parse_depth().0,
            admin_ids: self.bot.admins(),
        }
    }
}
