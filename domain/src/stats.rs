//! Usage statistics

use crate::core::language::Language;
use crate::persona::catalog::Persona;
use crate::persona::id::PersonaId;
use chrono::{DateTime, Local, Timelike};
use std::collections::BTreeMap;

/// Aggregate counters of persona replies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageStats {
    pub total_messages: u64,
    pub by_persona: BTreeMap<PersonaId, u64>,
    /// Local hour of day (0-23) → replies
    pub by_hour: BTreeMap<u32, u64>,
}

impl UsageStats {
    pub fn record(&mut self, persona: PersonaId, at: DateTime<Local>) {
        self.total_messages += 1;
        *self.by_persona.entry(persona).or_default() += 1;
        *self.by_hour.entry(at.hour()).or_default() += 1;
    }

    pub fn render(&self, language: Language) -> String {
        let (title, total, roles, hours) = match language {
            Language::Ru => (
                "Статистика использования",
                "Общее количество сообщений",
                "Распределение по ролям",
                "Самые активные часы",
            ),
            Language::En => (
                "Usage Statistics",
                "Total messages",
                "Distribution by role",
                "Most active hours",
            ),
        };

        let mut text = format!("📊 {}\n{}: {}\n{}:\n", title, total, self.total_messages, roles);
        for (persona, count) in &self.by_persona {
            text.push_str(&format!("{}: {}\n", Persona::get(*persona).label(), count));
        }
        text.push_str(&format!("{}:\n", hours));
        for (hour, count) in &self.by_hour {
            text.push_str(&format!("{hour}:00 - {hour}:59: {count}\n"));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_counts_persona_and_hour() {
        let mut stats = UsageStats::default();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
        stats.record(PersonaId::Ceo, at);
        stats.record(PersonaId::Ceo, at);
        stats.record(PersonaId::Cfo, at);

        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.by_persona[&PersonaId::Ceo], 2);
        assert_eq!(stats.by_hour[&14], 3);
    }

    #[test]
    fn test_render_english() {
        let mut stats = UsageStats::default();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        stats.record(PersonaId::Cto, at);

        let text = stats.render(Language::En);
        assert!(text.contains("Total messages: 1"));
        assert!(text.contains("👨‍💻 CTO: 1"));
        assert!(text.contains("9:00 - 9:59: 1"));
    }
}
