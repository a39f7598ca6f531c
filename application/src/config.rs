//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as discussion pacing and the mode idle window.

use boardroom_domain::session::discussion::DEFAULT_CONTEXT_WINDOW;
use boardroom_domain::session::mode::DEFAULT_MODE_TIMEOUT;
use boardroom_domain::{ConversationId, HistoryDepth, Language};
use std::time::Duration;

/// Delay between two persona turns of a discussion
pub const DEFAULT_PACING: Duration = Duration::from_secs(2);

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Pause between persona turns; keeps the transport from bursting.
    pub pacing: Duration,
    /// Idle window after which a non-Normal mode falls back to Normal.
    pub mode_timeout: Duration,
    /// Recent discussion turns quoted in follow-up prompts.
    pub context_window: usize,
    /// Language of conversations that never picked one.
    pub default_language: Language,
    /// History depth of conversations that never set one.
    pub default_depth: HistoryDepth,
    /// Conversations allowed to run `/admin_stats`.
    pub admin_ids: Vec<ConversationId>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
            mode_timeout: DEFAULT_MODE_TIMEOUT,
            context_window: DEFAULT_CONTEXT_WINDOW,
            default_language: Language::default(),
            default_depth: HistoryDepth::default(),
            admin_ids: Vec::new(),
        }
    }
}

impl BehaviorConfig {
    /// Set the pacing delay (zero disables it, which tests rely on)
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_mode_timeout(mut self, timeout: Duration) -> Self {
        self.mode_timeout = timeout;
        self
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_admins(mut self, admins: Vec<ConversationId>) -> Self {
        self.admin_ids = admins;
        self
    }

    pub fn is_admin(&self, conversation: ConversationId) -> bool {
        self.admin_ids.contains(&conversation)
    }
}
