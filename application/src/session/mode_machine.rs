//! Conversation mode state machine
//!
//! A conversation is in [`Mode::Normal`] unless a command put it into a
//! waiting mode. Non-Normal modes expire after an idle window; expiry is
//! evaluated lazily on the next read.

use boardroom_domain::{ConversationId, Mode, ModeEntry};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

pub struct ModeStateMachine {
    entries: Mutex<HashMap<ConversationId, ModeEntry>>,
    idle_timeout: Duration,
}

impl ModeStateMachine {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn set_mode(&self, conversation: ConversationId, mode: Mode) {
        self.set_mode_at(conversation, mode, Utc::now());
    }

    /// Record `mode` as entered at `now`
    pub fn set_mode_at(&self, conversation: ConversationId, mode: Mode, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if mode == Mode::Normal {
            entries.remove(&conversation);
        } else {
            debug!("Conversation {} enters mode {}", conversation, mode);
            entries.insert(conversation, ModeEntry::new(mode, now));
        }
    }

    pub fn current_mode(&self, conversation: ConversationId) -> Mode {
        self.current_mode_at(conversation, Utc::now())
    }

    /// Mode in effect at `now`; an expired entry is dropped and reads as Normal
    pub fn current_mode_at(&self, conversation: ConversationId, now: DateTime<Utc>) -> Mode {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(&conversation) {
            None => Mode::Normal,
            Some(entry) if entry.is_expired(now, self.idle_timeout) => {
                debug!(
                    "Mode {} of conversation {} expired",
                    entry.mode, conversation
                );
                entries.remove(&conversation);
                Mode::Normal
            }
            Some(entry) => entry.mode,
        }
    }

    pub fn reset_mode(&self, conversation: ConversationId) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&conversation);
    }
}

impl Default for ModeStateMachine {
    fn default() -> Self {
        Self::new(boardroom_domain::session::mode::DEFAULT_MODE_TIMEOUT)
    }
}
