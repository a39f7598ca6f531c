//! Outbound messaging port
//!
//! The transport the orchestrator answers through. The only shipped adapter
//! is the console transport; a chat-platform adapter would implement the same
//! three operations.

use async_trait::async_trait;
use boardroom_domain::ConversationId;
use thiserror::Error;

/// One button of an interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    /// Payload echoed back as `InboundEvent::Choice::data`
    pub data: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("Transport closed")]
    Closed,

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Messaging transport towards one or many conversations
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    async fn send_text(&self, conversation: ConversationId, text: &str) -> Result<(), ReplyError>;

    /// Present `prompt` with one button per choice
    async fn send_choices(
        &self,
        conversation: ConversationId,
        prompt: &str,
        choices: Vec<Choice>,
    ) -> Result<(), ReplyError>;

    /// Deliver a file
    async fn send_document(
        &self,
        conversation: ConversationId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ReplyError>;
}
