//! Turn progress port
//!
//! Reports persona turns as they are dispatched, so an interactive front end
//! can show that a backend call is in flight.

use boardroom_domain::{ConversationId, PersonaId};

/// Callback for progress updates while personas are generating
pub trait TurnNotifier: Send + Sync {
    /// Called right before the backend call of a turn
    fn on_turn_start(&self, conversation: ConversationId, persona: PersonaId);

    /// Called once the turn's text is known (`success` is false for error text)
    fn on_turn_complete(&self, conversation: ConversationId, persona: PersonaId, success: bool);
}

/// No-op notifier for when progress reporting is not needed
pub struct NoProgress;

impl TurnNotifier for NoProgress {
    fn on_turn_start(&self, _conversation: ConversationId, _persona: PersonaId) {}
    fn on_turn_complete(&self, _conversation: ConversationId, _persona: PersonaId, _success: bool) {}
}
