//! Per-conversation, per-persona dialogue history

use boardroom_domain::{ConversationId, DateRange, HistoryDepth, HistoryEntry, PersonaId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

type PersonaLogs = BTreeMap<PersonaId, Vec<HistoryEntry>>;

/// In-memory history of every conversation
///
/// Logs are keyed by persona in catalog order, so every query that walks all
/// personas reports them in that order.
#[derive(Default)]
pub struct HistoryStore {
    logs: Mutex<HashMap<ConversationId, PersonaLogs>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, conversation: ConversationId, persona: PersonaId, entry: HistoryEntry) {
        let mut logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        logs.entry(conversation)
            .or_default()
            .entry(persona)
            .or_default()
            .push(entry);
    }

    /// Trailing `min(len, depth)` entries, oldest first
    pub fn window(
        &self,
        conversation: ConversationId,
        persona: PersonaId,
        depth: HistoryDepth,
    ) -> Vec<HistoryEntry> {
        let logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        logs.get(&conversation)
            .and_then(|by_persona| by_persona.get(&persona))
            .map(|entries| {
                let skip = entries.len().saturating_sub(depth.get());
                entries[skip..].to_vec()
            })
            .unwrap_or_default()
    }

    pub fn clear(&self, conversation: ConversationId, persona: PersonaId) {
        let mut logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(by_persona) = logs.get_mut(&conversation) {
            by_persona.remove(&persona);
        }
    }

    pub fn clear_conversation(&self, conversation: ConversationId) {
        self.logs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&conversation);
    }

    pub fn is_empty(&self, conversation: ConversationId) -> bool {
        let logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        logs.get(&conversation)
            .is_none_or(|by_persona| by_persona.values().all(Vec::is_empty))
    }

    /// Case-insensitive substring search over both sides of every exchange
    pub fn search(&self, conversation: ConversationId, keyword: &str) -> Vec<(PersonaId, HistoryEntry)> {
        let needle = keyword.to_lowercase();
        self.collect(conversation, |entry| entry.contains_lowercase(&needle))
    }

    /// Entries whose calendar date lies in `range` (both ends inclusive)
    pub fn filter_by_date(
        &self,
        conversation: ConversationId,
        range: &DateRange,
    ) -> Vec<(PersonaId, HistoryEntry)> {
        self.collect(conversation, |entry| range.contains(entry.date))
    }

    /// Flat text transcript; `None` when there is nothing to export
    pub fn export(&self, conversation: ConversationId) -> Option<String> {
        let logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        let by_persona = logs.get(&conversation)?;

        let mut text = String::from("=== Dialog History Export ===\n\n");
        let mut any = false;
        for (persona, entries) in by_persona.iter().filter(|(_, e)| !e.is_empty()) {
            any = true;
            text.push_str(&format!("=== {} ===\n", persona));
            for entry in entries {
                text.push_str(&format!("User: {}\n", entry.user_text));
                text.push_str(&format!("{}: {}\n\n", persona, entry.assistant_text));
            }
        }
        any.then_some(text)
    }

    fn collect(
        &self,
        conversation: ConversationId,
        keep: impl Fn(&HistoryEntry) -> bool,
    ) -> Vec<(PersonaId, HistoryEntry)> {
        let logs = self.logs.lock().unwrap_or_else(|e| e.into_inner());
        let Some(by_persona) = logs.get(&conversation) else {
            return Vec::new();
        };
        by_persona
            .iter()
            .flat_map(|(persona, entries)| {
                entries
                    .iter()
                    .filter(|entry| keep(entry))
                    .map(|entry| (*persona, entry.clone()))
            })
            .collect()
    }
}
