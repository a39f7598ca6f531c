//! Discussion configuration from TOML (`[discussion]` section)

use super::{ConfigIssue, Severity};
use boardroom_domain::HistoryDepth;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Pause between persona turns, in milliseconds
    pub pacing_ms: u64,
    /// Idle seconds before a waiting mode falls back to normal
    pub mode_timeout_secs: u64,
    /// History depth of conversations that never ran `/depth`
    pub default_depth: i64,
    /// Recent turns quoted in follow-up prompts
    pub context_window: usize,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self {
            pacing_ms: 2000,
            mode_timeout_secs: 300,
            default_depth: HistoryDepth::DEFAULT.get() as i64,
            context_window: 3,
        }
    }
}

impl FileDiscussionConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn mode_timeout(&self) -> Duration {
        Duration::from_secs(self.mode_timeout_secs)
    }

    /// Parse `default_depth`, falling back to the built-in default
    pub fn parse_depth(&self) -> (HistoryDepth, Vec<ConfigIssue>) {
        match HistoryDepth::try_new(self.default_depth) {
            Ok(depth) => (depth, Vec::new()),
            Err(e) => (
                HistoryDepth::DEFAULT,
                vec![ConfigIssue::new(
                    Severity::Warning,
                    "discussion.default_depth",
                    format!("{}, using {}", e, HistoryDepth::DEFAULT),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_depth().1;
        if self.context_window == 0 {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "discussion.context_window",
                "context_window 0 is raised to 1",
            ));
        }
        if self.mode_timeout_secs == 0 {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "discussion.mode_timeout_secs",
                "mode_timeout_secs 0 makes every waiting mode expire immediately",
            ));
        }
        issues
    }
}
