//! Per-conversation state
//!
//! Everything the orchestrator remembers about a conversation lives behind
//! [`SessionRegistry`]. State is volatile: a restart forgets it all.

pub mod history_store;
pub mod mode_machine;
pub mod registry;

pub use history_store::HistoryStore;
pub use mode_machine::ModeStateMachine;
pub use registry::{DiscussionSession, SessionConflict, SessionRegistry};
