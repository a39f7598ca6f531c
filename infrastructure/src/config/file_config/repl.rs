//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while a persona is generating
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
    /// Conversation id the console speaks as
    pub conversation_id: i64,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            conversation_id: 1,
        }
    }
}
