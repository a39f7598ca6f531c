//! Localized prompt text for persona requests and discussion turns

use crate::core::language::Language;
use crate::persona::id::PersonaId;
use crate::session::discussion::DiscussionTurn;

/// Templates for the text the orchestrator sends to personas
pub struct PromptTemplate;

impl PromptTemplate {
    /// Note appended to the system prompt when only part of the board takes part
    pub fn team_note(language: Language, members: &[PersonaId]) -> String {
        let names = members
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        match language {
            Language::Ru => format!("\nВ обсуждении участвуют только: {}", names),
            Language::En => format!("\nOnly following roles participate in discussion: {}", names),
        }
    }

    /// Reply-language instruction appended to every system prompt
    pub fn language_instruction(language: Language) -> String {
        format!("\nRespond in {}.", language.english_name())
    }

    /// First turn of a cycle: the bare topic
    pub fn topic_statement(language: Language, topic: &str) -> String {
        match language {
            Language::Ru => format!("Тема для обсуждения: {}", topic),
            Language::En => format!("Discussion topic: {}", topic),
        }
    }

    /// Later turns of a cycle: topic plus the most recent contributions
    pub fn follow_up<'a>(
        language: Language,
        topic: &str,
        recent: impl IntoIterator<Item = &'a DiscussionTurn>,
    ) -> String {
        let mut prompt = match language {
            Language::Ru => format!("Тема: {}\n\nПредыдущие ответы:\n", topic),
            Language::En => format!("Topic: {}\n\nPrevious responses:\n", topic),
        };

        let lines: Vec<String> = recent
            .into_iter()
            .map(|turn| format!("{}: {}", turn.persona, turn.response))
            .collect();
        prompt.push_str(&lines.join("\n"));

        prompt.push_str(match language {
            Language::Ru => "\n\nТвой ответ с учетом предыдущих сообщений:",
            Language::En => "\n\nYour response considering previous messages:",
        });
        prompt
    }

    /// Topic of the next cycle after the user chose to continue
    pub fn continuation_topic(language: Language, last_response: &str) -> String {
        match language {
            Language::Ru => format!(
                "Продолжи обсуждение, учитывая предыдущие ответы. Развей последнюю мысль: {}",
                last_response
            ),
            Language::En => format!(
                "Continue the discussion, considering previous responses. Develop the last thought: {}",
                last_response
            ),
        }
    }
}
