//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_news;
pub mod build_prompt;
pub mod command;
pub mod dispatch_turn;
pub mod route_event;
pub mod run_discussion;
