//! Bot configuration from TOML (`[bot]` section)

use super::{ConfigIssue, Severity};
use boardroom_domain::{ConversationId, Language};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBotConfig {
    /// Reply language of new conversations ("ru" or "en")
    pub default_language: String,
    /// Conversations allowed to run `/admin_stats`
    pub admin_ids: Vec<i64>,
}

impl Default for FileBotConfig {
    fn default() -> Self {
        Self {
            default_language: Language::default().as_str().to_string(),
            admin_ids: Vec::new(),
        }
    }
}

impl FileBotConfig {
    /// Parse `default_language`, falling back to Russian
    pub fn parse_language(&self) -> (Language, Vec<ConfigIssue>) {
        match self.default_language.parse::<Language>() {
            Ok(language) => (language, Vec::new()),
            Err(_) => (
                Language::default(),
                vec![ConfigIssue::new(
                    Severity::Warning,
                    "bot.default_language",
                    format!(
                        "unknown language '{}', falling back to '{}'",
                        self.default_language,
                        Language::default()
                    ),
                )],
            ),
        }
    }

    pub fn admins(&self) -> Vec<ConversationId> {
        self.admin_ids.iter().copied().map(ConversationId::from).collect()
    }
}
