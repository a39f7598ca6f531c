//! Conversation session domain.
//!
//! - [`mode::Mode`]: how the next plain-text message is interpreted
//! - [`history::HistoryEntry`]: one user/persona exchange
//! - [`history::HistoryDepth`]: bounded prompt history window
//! - [`discussion::Roster`] / [`discussion::DiscussionContext`]: round-robin discussion data

pub mod discussion;
pub mod history;
pub mod mode;
