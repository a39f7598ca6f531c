//! Presentation layer for boardroom
//!
//! This crate contains the CLI definition, the console transport that
//! renders replies, the turn spinner, and the interactive REPL that turns
//! typed lines into inbound events.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{BoardroomRepl, ReplInput};
pub use cli::commands::Cli;
pub use output::console::ConsoleTransport;
pub use progress::reporter::TurnProgress;
