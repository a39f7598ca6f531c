//! Domain layer for boardroom
//!
//! This crate contains the core business vocabulary: personas, conversation
//! modes, history entries, discussion rosters and every piece of text the
//! orchestrator shows to users or sends to backends. It has no dependencies
//! on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Persona**: a board member with a fixed system prompt, temperature and
//!   backend binding
//! - **Discussion cycle**: one full pass through all participating personas
//!   before the user is asked whether to continue
//! - **Mode**: the conversation's current interpretation rule for the next
//!   plain-text message

pub mod core;
pub mod locale;
pub mod news;
pub mod persona;
pub mod prompt;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use core::{
    conversation::ConversationId, error::DomainError, language::Language, text::preview,
    text::split_first_token,
};
pub use locale::{Notice, ResultsKind};
pub use news::Analyst;
pub use persona::{
    catalog::Persona,
    id::{PersonaId, ProviderKind},
};
pub use prompt::{
    request::{ChatMessage, ChatRole, GenerationRequest},
    template::PromptTemplate,
};
pub use session::{
    discussion::{DiscussionContext, DiscussionState, DiscussionTurn, Roster},
    history::{DateRange, HistoryDepth, HistoryEntry},
    mode::{Mode, ModeEntry},
};
pub use stats::UsageStats;
