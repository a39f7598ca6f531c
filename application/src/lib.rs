//! Application layer for boardroom
//!
//! This crate contains use cases, port definitions, per-conversation state
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    llm_backend::{GatewayError, LlmBackend},
    progress::{NoProgress, TurnNotifier},
    reply_channel::{Choice, ReplyChannel, ReplyError},
};
pub use session::{DiscussionSession, HistoryStore, ModeStateMachine, SessionConflict, SessionRegistry};
pub use use_cases::analyze_news::NewsDesk;
pub use use_cases::build_prompt::PromptBuilder;
pub use use_cases::command::{Command, InboundEvent};
pub use use_cases::dispatch_turn::{BackendDispatcher, TurnText};
pub use use_cases::route_event::CommandRouter;
pub use use_cases::run_discussion::{DiscussionError, DiscussionHandle, DiscussionScheduler};
