//! Reply language of a conversation

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language used for replies and prompt instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    /// Short tag used in config files and choice callbacks
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Language name as it appears in the "respond in ..." instruction
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::Ru => "Russian",
            Language::En => "English",
        }
    }

    /// Label shown on the language choice buttons
    pub fn button_label(&self) -> &'static str {
        match self {
            Language::Ru => "Русский 🇷🇺",
            Language::En => "English 🇬🇧",
        }
    }

    pub fn all() -> [Language; 2] {
        [Language::Ru, Language::En]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" | "rus" | "russian" => Ok(Language::Ru),
            "en" | "eng" | "english" => Ok(Language::En),
            other => Err(DomainError::UnsupportedLanguage(other.to_string())),
        }
    }
}
