//! Provider-agnostic generation request

use serde::{Deserialize, Serialize};

/// Role of a prior message in a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A prior message replayed to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a backend needs to produce one persona reply
///
/// `prior_messages` alternate user/assistant, oldest first; `user_turn` is the
/// final user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub prior_messages: Vec<ChatMessage>,
    pub user_turn: String,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, user_turn: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prior_messages: Vec::new(),
            user_turn: user_turn.into(),
            temperature: 0.7,
        }
    }

    pub fn with_prior_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.prior_messages = messages;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
