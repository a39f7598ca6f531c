//! Interaction modes of a conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Idle window after which any non-Normal mode falls back to Normal
pub const DEFAULT_MODE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Interpretation rule for the next plain-text message of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Plain messages go to the current persona
    #[default]
    Normal,
    /// Next message is `<ROLE> <question>`
    AwaitingAskInput,
    /// Next message is a discussion topic for the full board
    AwaitingChatTopic,
    /// Next message is `<R1,R2,...> <topic>`
    AwaitingTeamSpec,
    /// Messages are news items for the analyst desk
    NewsMode,
}

impl Mode {
    /// Single-shot modes that the next plain message consumes
    pub fn is_waiting(&self) -> bool {
        matches!(
            self,
            Mode::AwaitingAskInput | Mode::AwaitingChatTopic | Mode::AwaitingTeamSpec
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::AwaitingAskInput => "ask",
            Mode::AwaitingChatTopic => "chat",
            Mode::AwaitingTeamSpec => "team",
            Mode::NewsMode => "news",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A mode together with the instant it was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeEntry {
    pub mode: Mode,
    pub entered_at: DateTime<Utc>,
}

impl ModeEntry {
    pub fn new(mode: Mode, entered_at: DateTime<Utc>) -> Self {
        Self { mode, entered_at }
    }

    /// True once more than `idle` has elapsed since the mode was entered.
    ///
    /// A clock that moved backwards never expires the entry.
    pub fn is_expired(&self, now: DateTime<Utc>, idle: Duration) -> bool {
        (now - self.entered_at)
            .to_std()
            .map(|elapsed| elapsed > idle)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_waiting_modes() {
        assert!(Mode::AwaitingAskInput.is_waiting());
        assert!(Mode::AwaitingChatTopic.is_waiting());
        assert!(Mode::AwaitingTeamSpec.is_waiting());
        assert!(!Mode::NewsMode.is_waiting());
        assert!(!Mode::Normal.is_waiting());
    }

    #[test]
    fn test_expiry_boundary() {
        let start = Utc::now();
        let entry = ModeEntry::new(Mode::AwaitingChatTopic, start);

        assert!(!entry.is_expired(start + TimeDelta::minutes(5), DEFAULT_MODE_TIMEOUT));
        assert!(entry.is_expired(
            start + TimeDelta::minutes(5) + TimeDelta::seconds(1),
            DEFAULT_MODE_TIMEOUT
        ));
    }

    #[test]
    fn test_clock_skew_does_not_expire() {
        let start = Utc::now();
        let entry = ModeEntry::new(Mode::NewsMode, start);
        assert!(!entry.is_expired(start - TimeDelta::hours(1), DEFAULT_MODE_TIMEOUT));
    }
}
