//! Spinner shown while a persona is generating

use boardroom_application::TurnNotifier;
use boardroom_domain::{ConversationId, Persona, PersonaId};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Reports in-flight persona turns with one spinner per conversation
pub struct TurnProgress {
    spinners: Mutex<HashMap<ConversationId, ProgressBar>>,
}

impl TurnProgress {
    pub fn new() -> Self {
        Self {
            spinners: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn in_flight(&self) -> usize {
        self.spinners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for TurnProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnNotifier for TurnProgress {
    fn on_turn_start(&self, conversation: ConversationId, persona: PersonaId) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Persona::get(persona).label());
        pb.set_message("is thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self
            .spinners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(conversation, pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_turn_complete(&self, conversation: ConversationId, persona: PersonaId, success: bool) {
        let Some(pb) = self
            .spinners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&conversation)
        else {
            return;
        };

        if success {
            pb.finish_and_clear();
        } else {
            pb.finish_with_message(format!("{} {} failed", "x".red(), persona));
        }
    }
}
