//! Core domain concepts shared across all subdomains.
//!
//! - [`conversation::ConversationId`]: identity every piece of state is keyed by
//! - [`language::Language`]: reply language of a conversation
//! - [`error::DomainError`]: domain-level errors

pub mod conversation;
pub mod error;
pub mod language;
pub mod text;
