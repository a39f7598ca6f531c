//! Prompt assembly
//!
//! Turns a raw user input plus conversation state into the
//! [`GenerationRequest`] a backend receives.

use boardroom_domain::{
    ChatMessage, DiscussionContext, GenerationRequest, HistoryDepth, HistoryEntry, Language,
    Persona, PersonaId, PromptTemplate,
};

/// Stateless prompt builder
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the request for one persona reply.
    ///
    /// `restriction` names the participants of a hand-picked team; `history`
    /// is the persona's log, of which only the trailing `depth` entries are
    /// replayed as prior messages.
    pub fn build(
        raw_input: &str,
        persona: PersonaId,
        language: Language,
        restriction: Option<&[PersonaId]>,
        history: &[HistoryEntry],
        depth: HistoryDepth,
    ) -> GenerationRequest {
        let record = Persona::get(persona);

        let mut system_prompt = record.system_prompt.to_string();
        if let Some(members) = restriction {
            system_prompt.push_str(&PromptTemplate::team_note(language, members));
        }
        system_prompt.push_str(&PromptTemplate::language_instruction(language));

        let skip = history.len().saturating_sub(depth.get());
        let prior_messages = history[skip..]
            .iter()
            .flat_map(|entry| {
                [
                    ChatMessage::user(entry.user_text.clone()),
                    ChatMessage::assistant(entry.assistant_text.clone()),
                ]
            })
            .collect();

        GenerationRequest::new(system_prompt, raw_input)
            .with_prior_messages(prior_messages)
            .with_temperature(record.temperature)
    }

    /// Raw input of a discussion turn: the bare topic on the first turn of a
    /// cycle, otherwise the topic plus the rolling context
    pub fn discussion_input(language: Language, topic: &str, context: &DiscussionContext) -> String {
        if context.is_empty() {
            PromptTemplate::topic_statement(language, topic)
        } else {
            PromptTemplate::follow_up(language, topic, context.recent())
        }
    }
}
