//! Session registry
//!
//! The single owner of per-conversation state. Every map is guarded by a
//! `std::sync::Mutex` that is only held for short, non-await sections; no
//! lock is ever held across a backend call or a send.

use super::history_store::HistoryStore;
use super::mode_machine::ModeStateMachine;
use crate::config::BehaviorConfig;
use boardroom_domain::{
    ConversationId, DiscussionContext, DiscussionState, HistoryDepth, Language, PersonaId, Roster,
    UsageStats,
};
use chrono::Local;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A second discussion was requested while one is live
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Discussion already in progress for conversation {0}")]
pub struct SessionConflict(pub ConversationId);

/// The live discussion of one conversation
#[derive(Debug)]
pub struct DiscussionSession {
    pub token: CancellationToken,
    pub roster: Roster,
    pub topic: String,
    /// Persona turns emitted in the current cycle
    pub messages_emitted: usize,
    pub context: DiscussionContext,
    pub state: DiscussionState,
}

impl DiscussionSession {
    pub fn new(roster: Roster, topic: impl Into<String>, context_window: usize) -> Self {
        Self {
            token: CancellationToken::new(),
            roster,
            topic: topic.into(),
            messages_emitted: 0,
            context: DiscussionContext::new(context_window),
            state: DiscussionState::Running,
        }
    }

    /// True once every participant has spoken in this cycle
    pub fn cycle_complete(&self) -> bool {
        self.messages_emitted >= self.roster.len()
    }
}

pub struct SessionRegistry {
    behavior: BehaviorConfig,
    modes: ModeStateMachine,
    history: HistoryStore,
    sessions: Mutex<HashMap<ConversationId, DiscussionSession>>,
    languages: Mutex<HashMap<ConversationId, Language>>,
    depths: Mutex<HashMap<ConversationId, HistoryDepth>>,
    speakers: Mutex<HashMap<ConversationId, PersonaId>>,
    stats: Mutex<UsageStats>,
}

impl SessionRegistry {
    pub fn new(behavior: BehaviorConfig) -> Self {
        Self {
            modes: ModeStateMachine::new(behavior.mode_timeout),
            history: HistoryStore::new(),
            sessions: Mutex::new(HashMap::new()),
            languages: Mutex::new(HashMap::new()),
            depths: Mutex::new(HashMap::new()),
            speakers: Mutex::new(HashMap::new()),
            stats: Mutex::new(UsageStats::default()),
            behavior,
        }
    }

    pub fn behavior(&self) -> &BehaviorConfig {
        &self.behavior
    }

    pub fn modes(&self) -> &ModeStateMachine {
        &self.modes
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    // ==================== Discussion sessions ====================

    /// Install `session` unless the conversation already has one.
    ///
    /// Returns the session's cancellation token on success.
    pub fn register_session(
        &self,
        conversation: ConversationId,
        session: DiscussionSession,
    ) -> Result<CancellationToken, SessionConflict> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        if sessions.contains_key(&conversation) {
            return Err(SessionConflict(conversation));
        }
        let token = session.token.clone();
        info!(
            "Conversation {}: discussion registered with {} participants",
            conversation,
            session.roster.len()
        );
        sessions.insert(conversation, session);
        Ok(token)
    }

    pub fn has_active_session(&self, conversation: ConversationId) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&conversation)
    }

    /// Remove the session and cancel its token
    pub fn clear_session(&self, conversation: ConversationId) -> Option<DiscussionSession> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let removed = sessions.remove(&conversation);
        if let Some(session) = &removed {
            // Cancelled before the lock is released, so no successor can observe a live token
            session.token.cancel();
            debug!("Conversation {}: discussion session cleared", conversation);
        }
        removed
    }

    /// Run `f` against the live session; `None` when there is none
    pub fn with_session<R>(
        &self,
        conversation: ConversationId,
        f: impl FnOnce(&mut DiscussionSession) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.get_mut(&conversation).map(f)
    }

    // ==================== Conversation settings ====================

    pub fn language(&self, conversation: ConversationId) -> Language {
        self.languages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&conversation)
            .copied()
            .unwrap_or(self.behavior.default_language)
    }

    pub fn set_language(&self, conversation: ConversationId, language: Language) {
        self.languages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(conversation, language);
    }

    pub fn depth(&self, conversation: ConversationId) -> HistoryDepth {
        self.depths
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&conversation)
            .copied()
            .unwrap_or(self.behavior.default_depth)
    }

    pub fn set_depth(&self, conversation: ConversationId, depth: HistoryDepth) {
        self.depths
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(conversation, depth);
    }

    /// Last-addressed persona, CEO until something else is chosen
    pub fn current_persona(&self, conversation: ConversationId) -> PersonaId {
        self.speakers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&conversation)
            .copied()
            .unwrap_or(PersonaId::PRIMARY)
    }

    pub fn set_current_persona(&self, conversation: ConversationId, persona: PersonaId) {
        self.speakers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(conversation, persona);
    }

    pub fn clear_current_persona(&self, conversation: ConversationId) {
        self.speakers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&conversation);
    }

    /// Forget the conversation's discussion, mode, history and speaker.
    ///
    /// Language and depth are preferences and survive.
    pub fn reset_conversation(&self, conversation: ConversationId) {
        self.clear_session(conversation);
        self.modes.reset_mode(conversation);
        self.history.clear_conversation(conversation);
        self.clear_current_persona(conversation);
    }

    // ==================== Usage statistics ====================

    pub fn record_usage(&self, persona: PersonaId) {
        self.stats
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record(persona, Local::now());
    }

    pub fn usage_stats(&self) -> UsageStats {
        self.stats.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(BehaviorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_domain::{HistoryEntry, Mode};

    const CONV: ConversationId = ConversationId::new(100);

    fn session() -> DiscussionSession {
        DiscussionSession::new(Roster::full_board(), "topic", 3)
    }

    #[test]
    fn test_second_registration_conflicts() {
        let registry = SessionRegistry::default();
        registry.register_session(CONV, session()).unwrap();

        let err = registry.register_session(CONV, session()).unwrap_err();
        assert_eq!(err, SessionConflict(CONV));
        assert!(registry.has_active_session(CONV));
    }

    #[test]
    fn test_clear_session_cancels_token() {
        let registry = SessionRegistry::default();
        let token = registry.register_session(CONV, session()).unwrap();

        assert!(registry.clear_session(CONV).is_some());
        assert!(token.is_cancelled());
        assert!(!registry.has_active_session(CONV));
        assert!(registry.clear_session(CONV).is_none());
    }

    #[test]
    fn test_with_session_mutates_in_place() {
        let registry = SessionRegistry::default();
        registry.register_session(CONV, session()).unwrap();

        registry.with_session(CONV, |s| s.messages_emitted = 8);
        assert_eq!(registry.with_session(CONV, |s| s.cycle_complete()), Some(true));
        assert_eq!(registry.with_session(ConversationId::new(1), |s| s.messages_emitted), None);
    }

    #[test]
    fn test_defaults_follow_behavior_config() {
        let behavior = BehaviorConfig::default().with_default_language(Language::En);
        let registry = SessionRegistry::new(behavior);

        assert_eq!(registry.language(CONV), Language::En);
        assert_eq!(registry.depth(CONV), HistoryDepth::DEFAULT);
        assert_eq!(registry.current_persona(CONV), PersonaId::Ceo);

        registry.set_language(CONV, Language::Ru);
        registry.set_current_persona(CONV, PersonaId::Cfo);
        assert_eq!(registry.language(CONV), Language::Ru);
        assert_eq!(registry.current_persona(CONV), PersonaId::Cfo);
    }

    #[test]
    fn test_reset_conversation_keeps_preferences() {
        let registry = SessionRegistry::default();
        let depth = HistoryDepth::try_new(9).unwrap();
        registry.set_language(CONV, Language::En);
        registry.set_depth(CONV, depth);
        registry.set_current_persona(CONV, PersonaId::Cro);
        registry.modes().set_mode(CONV, Mode::NewsMode);
        registry.history().append(CONV, PersonaId::Cro, HistoryEntry::new("a", "b"));
        let token = registry.register_session(CONV, session()).unwrap();

        registry.reset_conversation(CONV);

        assert!(token.is_cancelled());
        assert_eq!(registry.modes().current_mode(CONV), Mode::Normal);
        assert!(registry.history().is_empty(CONV));
        assert_eq!(registry.current_persona(CONV), PersonaId::Ceo);
        assert_eq!(registry.language(CONV), Language::En);
        assert_eq!(registry.depth(CONV), depth);
    }

    #[test]
    fn test_usage_is_recorded() {
        let registry = SessionRegistry::default();
        registry.record_usage(PersonaId::Cto);
        registry.record_usage(PersonaId::Cto);
        registry.record_usage(PersonaId::Ceo);

        let stats = registry.usage_stats();
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.by_persona.get(&PersonaId::Cto), Some(&2));
    }
}
