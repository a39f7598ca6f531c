//! User-facing text in every supported language.
//!
//! Each [`Notice`] renders to the conversation's [`Language`]; the outer
//! layers never hard-code reply strings.

use crate::core::language::Language;
use crate::persona::catalog::Persona;
use crate::persona::id::PersonaId;
use crate::session::history::{HistoryDepth, HistoryEntry};

/// A reply the orchestrator sends on its own behalf (not a persona turn)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Welcome,
    LanguageChanged,
    ChooseLanguage,
    TopicRequest,
    DiscussionStarted { topic: String },
    TeamStarted { topic: String, members: Vec<PersonaId> },
    DiscussionAlreadyRunning,
    DiscussionStopped,
    NoDiscussion,
    CycleCompleted,
    DiscussionContinues,
    DiscussionEnded,
    DiscussionFailed,
    AskPrompt,
    AskFormat,
    UnknownRole,
    TeamPrompt,
    TeamFormat,
    UnknownCommand { command: String },
    SpeakerChanged { persona: PersonaId },
    CurrentSpeaker { persona: PersonaId },
    ChooseSpeaker,
    HistoryEmpty { persona: PersonaId },
    HistoryCleared { persona: PersonaId },
    DepthSet { depth: HistoryDepth },
    DepthInvalid,
    CurrentDepth { depth: HistoryDepth },
    ExportEmpty,
    SearchNoKeywords,
    SearchNoResults,
    FilterNoDates,
    FilterInvalidDates,
    FilterNoResults,
    AdminOnly,
    NewsReady,
    NewsNoText,
    NewsAnalyzing,
    NewsFailed { detail: String },
    ModeReset,
    BackendError { detail: String },
}

impl Notice {
    pub fn render(&self, language: Language) -> String {
        match language {
            Language::Ru => self.render_ru(),
            Language::En => self.render_en(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Notice::Welcome => format!("👋 Welcome to AGI Hedge Fund!\n\nOur team:\n{}\n\n{}", team_lines_en(), HELP_EN),
            Notice::LanguageChanged => "Language changed to English".into(),
            Notice::ChooseLanguage => "Выберите язык / Choose your language:".into(),
            Notice::TopicRequest => "Please specify the topic for discussion!".into(),
            Notice::DiscussionStarted { topic } => format!("📋 Starting discussion on topic: {}", topic),
            Notice::TeamStarted { topic, members } => format!("📋 Starting discussion on topic: {}\nParticipants:\n{}", topic, labels(members)),
            Notice::DiscussionAlreadyRunning => "Discussion is already in progress! Use /stop to end current discussion.".into(),
            Notice::DiscussionStopped => "🛑 Discussion stopped!\nUse /chat to start new discussion.".into(),
            Notice::NoDiscussion => "No active discussion.\nUse /chat to start new one.".into(),
            Notice::CycleCompleted => "Discussion cycle completed. Would you like to continue?".into(),
            Notice::DiscussionContinues => "Discussion continues...".into(),
            Notice::DiscussionEnded => format!("Group discussion finished.\n{} will keep answering your messages.", PersonaId::PRIMARY),
            Notice::DiscussionFailed => "An error occurred. Discussion stopped.".into(),
            Notice::AskPrompt => "Enter role and your question in format:\nCEO how to increase profit?".into(),
            Notice::AskFormat => "Please specify role and question!\nExample: /ask CEO how to increase profit?".into(),
            Notice::UnknownRole => format!("Unknown role! Available roles: {}", PersonaId::roster_list()),
            Notice::TeamPrompt => "Please specify roles and topic!\nExample: CEO,CTO,CFO discuss new trading strategy".into(),
            Notice::TeamFormat => "Please specify roles and topic!\nExample: /team CEO,CTO,CFO discuss new trading strategy".into(),
            Notice::UnknownCommand { command } => format!("❌ Unknown command: {}\n\n{}", command, HELP_EN),
            Notice::SpeakerChanged { persona } => format!("Now talking to {}", Persona::get(*persona).label()),
            Notice::CurrentSpeaker { persona } => format!("Current speaker: {}", Persona::get(*persona).label()),
            Notice::ChooseSpeaker => format!("Available roles:\n{}", team_labels()),
            Notice::HistoryEmpty { persona } => format!("No dialog history with {}", persona),
            Notice::HistoryCleared { persona } => format!("Dialog history with {} has been cleared", persona),
            Notice::DepthSet { depth } => format!("History depth set to {} messages", depth),
            Notice::DepthInvalid => format!("Please specify a number between {} and {}", HistoryDepth::MIN, HistoryDepth::MAX),
            Notice::CurrentDepth { depth } => format!("Current history depth: {} messages", depth),
            Notice::ExportEmpty => "No dialog history to export".into(),
            Notice::SearchNoKeywords => "Please provide keywords to search for.".into(),
            Notice::SearchNoResults => "No results found for the given keywords.".into(),
            Notice::FilterNoDates => "Please provide start and end dates in the format YYYY-MM-DD.".into(),
            Notice::FilterInvalidDates => "Invalid date format. Please use YYYY-MM-DD.".into(),
            Notice::FilterNoResults => "No results found for the given date range.".into(),
            Notice::AdminOnly => "You are not allowed to view this information.".into(),
            Notice::NewsReady => "Analysts are ready. Send news to receive trading signals.".into(),
            Notice::NewsNoText => "Failed to retrieve news text. Please ensure the message contains text or a media caption.".into(),
            Notice::NewsAnalyzing => "🔄 Analyzing the news...".into(),
            Notice::NewsFailed { detail } => format!("An error occurred during analysis: {}", detail),
            Notice::ModeReset => "Mode reset".into(),
            Notice::BackendError { detail } => format!("Error: {}", detail),
        }
    }

    fn render_ru(&self) -> String {
        match self {
            Notice::Welcome => format!("👋 Добро пожаловать в AGI Hedge Fund!\n\nНаша команда:\n{}\n\n{}", team_lines_ru(), HELP_RU),
            Notice::LanguageChanged => "Язык изменен на русский".into(),
            Notice::ChooseLanguage => "Выберите язык / Choose your language:".into(),
            Notice::TopicRequest => "Пожалуйста, укажите тему для обсуждения!".into(),
            Notice::DiscussionStarted { topic } => format!("📋 Начинаем обсуждение темы: {}", topic),
            Notice::TeamStarted { topic, members } => format!("📋 Начинаем обсуждение темы: {}\nУчастники:\n{}", topic, labels(members)),
            Notice::DiscussionAlreadyRunning => "Обсуждение уже идет! Используйте /stop чтобы остановить текущее обсуждение.".into(),
            Notice::DiscussionStopped => "🛑 Обсуждение остановлено!\nИспользуйте /chat чтобы начать новое обсуждение.".into(),
            Notice::NoDiscussion => "Сейчас нет активного обсуждения.\nИспользуйте /chat чтобы начать новое.".into(),
            Notice::CycleCompleted => "Цикл обсуждения завершен. Хотите продолжить?".into(),
            Notice::DiscussionContinues => "Обсуждение продолжается...".into(),
            Notice::DiscussionEnded => format!("Групповое обсуждение завершено.\nНа ваши сообщения продолжит отвечать {}.", PersonaId::PRIMARY),
            Notice::DiscussionFailed => "Произошла ошибка. Обсуждение остановлено.".into(),
            Notice::AskPrompt => "Введите роль и ваш вопрос в формате:\nCEO как увеличить прибыль?".into(),
            Notice::AskFormat => "Пожалуйста, укажите роль и вопрос!\nНапример: /ask CEO как увеличить прибыль?".into(),
            Notice::UnknownRole => format!("Неизвестная роль! Доступные роли: {}", PersonaId::roster_list()),
            Notice::TeamPrompt => "Пожалуйста, укажите роли и тему!\nНапример: CEO,CTO,CFO обсудить новую торговую стратегию".into(),
            Notice::TeamFormat => "Пожалуйста, укажите роли и тему!\nНапример: /team CEO,CTO,CFO обсудить новую торговую стратегию".into(),
            Notice::UnknownCommand { command } => format!("❌ Неизвестная команда: {}\n\n{}", command, HELP_RU),
            Notice::SpeakerChanged { persona } => format!("Теперь вы общаетесь с {}", Persona::get(*persona).label()),
            Notice::CurrentSpeaker { persona } => format!("Текущий собеседник: {}", Persona::get(*persona).label()),
            Notice::ChooseSpeaker => format!("Доступные роли:\n{}", team_labels()),
            Notice::HistoryEmpty { persona } => format!("Нет истории диалога с {}", persona),
            Notice::HistoryCleared { persona } => format!("История диалога с {} очищена", persona),
            Notice::DepthSet { depth } => format!("Глубина истории установлена на {} сообщений", depth),
            Notice::DepthInvalid => format!("Укажите число от {} до {}", HistoryDepth::MIN, HistoryDepth::MAX),
            Notice::CurrentDepth { depth } => format!("Текущая глубина истории: {} сообщений", depth),
            Notice::ExportEmpty => "Нет истории диалогов для экспорта".into(),
            Notice::SearchNoKeywords => "Пожалуйста, укажите ключевые слова для поиска.".into(),
            Notice::SearchNoResults => "По заданным ключевым словам ничего не найдено.".into(),
            Notice::FilterNoDates => "Пожалуйста, укажите начальную и конечную даты в формате ГГГГ-ММ-ДД.".into(),
            Notice::FilterInvalidDates => "Неверный формат даты. Пожалуйста, используйте ГГГГ-ММ-ДД.".into(),
            Notice::FilterNoResults => "По заданному диапазону дат ничего не найдено.".into(),
            Notice::AdminOnly => "У вас нет прав для просмотра этой информации.".into(),
            Notice::NewsReady => "Аналитики на связи. Отправьте новость для получения торговых сигналов.".into(),
            Notice::NewsNoText => "Не удалось получить текст новости. Убедитесь, что сообщение содержит текст или подпись к медиа.".into(),
            Notice::NewsAnalyzing => "🔄 Анализируем новость...".into(),
            Notice::NewsFailed { detail } => format!("Во время анализа произошла ошибка: {}", detail),
            Notice::ModeReset => "Режим сброшен".into(),
            Notice::BackendError { detail } => format!("Ошибка: {}", detail),
        }
    }
}

/// Labels of the two continuation choices: (continue, end)
pub fn continuation_labels(language: Language) -> (&'static str, &'static str) {
    match language {
        Language::Ru => ("Продолжить обсуждение", "Закончить обсуждение"),
        Language::En => ("Continue discussion", "End discussion"),
    }
}

/// `"<glyph> <ROLE>:\n<text>"`, how a persona turn is displayed
pub fn persona_reply(persona: PersonaId, text: &str) -> String {
    format!("{}:\n{}", Persona::get(persona).label(), text)
}

/// Section title for search / filter results
pub fn results_title(language: Language, kind: ResultsKind) -> String {
    match (language, kind) {
        (Language::En, ResultsKind::Search) => "🔍 Search Results".into(),
        (Language::Ru, ResultsKind::Search) => "🔍 Результаты поиска".into(),
        (Language::En, ResultsKind::Filter) => "📅 Filtered Results".into(),
        (Language::Ru, ResultsKind::Filter) => "📅 Отфильтрованные результаты".into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsKind {
    Search,
    Filter,
}

/// Render `(persona, entry)` matches as a reply body
pub fn render_matches(
    language: Language,
    kind: ResultsKind,
    matches: &[(PersonaId, HistoryEntry)],
) -> String {
    let mut text = format!("{}\n", results_title(language, kind));
    for (persona, entry) in matches {
        text.push_str(&format!("{}:\n", Persona::get(*persona).label()));
        text.push_str(&format!("🗣 User: {}\n", entry.user_text));
        text.push_str(&format!("👤 {}: {}\n\n", persona, entry.assistant_text));
    }
    text
}

/// Render the trailing history window of one persona
pub fn render_history(
    language: Language,
    persona: PersonaId,
    depth: HistoryDepth,
    window: &[HistoryEntry],
) -> String {
    let mut text = format!(
        "💬 {} - {}\n\n",
        persona,
        Notice::CurrentDepth { depth }.render(language)
    );
    for entry in window {
        text.push_str(&format!("🗣 User: {}\n", entry.user_text));
        text.push_str(&format!("👤 {}: {}\n\n", persona, entry.assistant_text));
    }
    text
}

fn labels(members: &[PersonaId]) -> String {
    members
        .iter()
        .map(|p| Persona::get(*p).label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn team_labels() -> String {
    Persona::all()
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join("\n")
}

fn team_lines_en() -> String {
    Persona::all()
        .iter()
        .map(|p| format!("{} - {}", p.label(), title_en(p.id)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn team_lines_ru() -> String {
    Persona::all()
        .iter()
        .map(|p| format!("{} - {}", p.label(), title_ru(p.id)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_en(persona: PersonaId) -> &'static str {
    match persona {
        PersonaId::Ceo => "Chief Executive Officer",
        PersonaId::Cmo => "Chief Marketing Officer",
        PersonaId::Cto => "Chief Technology Officer",
        PersonaId::Cfo => "Chief Financial Officer",
        PersonaId::Ciso => "Chief Information Security Officer",
        PersonaId::Cdo => "Chief Data Officer",
        PersonaId::Clo => "Chief Legal Officer",
        PersonaId::Cro => "Chief Risk Officer",
    }
}

fn title_ru(persona: PersonaId) -> &'static str {
    match persona {
        PersonaId::Ceo => "Генеральный директор",
        PersonaId::Cmo => "Директор по маркетингу",
        PersonaId::Cto => "Технический директор",
        PersonaId::Cfo => "Финансовый директор",
        PersonaId::Ciso => "Директор по информационной безопасности",
        PersonaId::Cdo => "Директор по данным",
        PersonaId::Clo => "Юридический директор",
        PersonaId::Cro => "Директор по рискам",
    }
}

const HELP_EN: &str = "Commands:
/chat <topic> - start group discussion
/ask <role> <question> - ask specific manager
/team <roles,comma,separated> <topic> - discussion with selected team
/stop - stop discussion
/language - change language
/switch <role> - change who answers your messages
/current - show who answers your messages
/history - show dialog history
/clear - clear dialog history
/depth <number> - set history depth (1-10)
/export - export dialog history
/stats - usage statistics
/search <keywords> - search dialog history
/filter <YYYY-MM-DD> <YYYY-MM-DD> - history for a date range
/news - switch to news mode
/exit - leave the current mode
/start - show welcome message

You can also just send a message, and CEO will respond to it!";

const HELP_RU: &str = "Команды:
/chat <тема> - начать групповое обсуждение
/ask <роль> <вопрос> - задать вопрос конкретному руководителю
/team <роли,через,запятую> <тема> - обсуждение выбранной группой
/stop - остановить обсуждение
/language - сменить язык
/switch <роль> - сменить собеседника
/current - показать текущего собеседника
/history - показать историю диалога
/clear - очистить историю диалога
/depth <число> - установить глубину истории (1-10)
/export - экспортировать историю диалогов
/stats - статистика использования
/search <слова> - поиск по истории
/filter <ГГГГ-ММ-ДД> <ГГГГ-ММ-ДД> - история за период
/news - переключить режим на новости
/exit - выйти из текущего режима
/start - показать приветствие

Вы также можете просто отправить сообщение, и CEO ответит на него!";
