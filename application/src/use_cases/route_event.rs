//! Event routing
//!
//! Entry point for everything a user does. Commands run directly; plain
//! messages are interpreted according to the conversation's mode, falling
//! back to one-on-one chat with the current persona.

use crate::ports::reply_channel::{Choice, ReplyChannel, ReplyError};
use crate::session::registry::SessionRegistry;
use crate::use_cases::analyze_news::NewsDesk;
use crate::use_cases::build_prompt::PromptBuilder;
use crate::use_cases::command::{Command, InboundEvent};
use crate::use_cases::dispatch_turn::BackendDispatcher;
use crate::use_cases::run_discussion::{
    DiscussionError, DiscussionHandle, DiscussionScheduler, CONTINUE_DISCUSSION, END_DISCUSSION,
};
use boardroom_domain::locale::{persona_reply, render_history, render_matches};
use boardroom_domain::{
    split_first_token, ConversationId, DateRange, DomainError, HistoryDepth, HistoryEntry,
    Language, Mode, Notice, Persona, PersonaId, ResultsKind, Roster,
};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Choice payload prefix for language selection (`lang_ru`)
pub const LANGUAGE_CHOICE_PREFIX: &str = "lang_";
/// Choice payload prefix for speaker selection (`switch_CFO`)
pub const SWITCH_CHOICE_PREFIX: &str = "switch_";

/// Routes inbound events to the matching use case
pub struct CommandRouter {
    registry: Arc<SessionRegistry>,
    dispatcher: Arc<BackendDispatcher>,
    channel: Arc<dyn ReplyChannel>,
    scheduler: DiscussionScheduler,
    news: NewsDesk,
}

impl CommandRouter {
    pub fn new(
        registry: Arc<SessionRegistry>,
        dispatcher: Arc<BackendDispatcher>,
        channel: Arc<dyn ReplyChannel>,
    ) -> Self {
        Self {
            scheduler: DiscussionScheduler::new(
                registry.clone(),
                dispatcher.clone(),
                channel.clone(),
            ),
            news: NewsDesk::new(dispatcher.clone(), channel.clone()),
            registry,
            dispatcher,
            channel,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Handle one event.
    ///
    /// When the event launched a discussion cycle, its handle is returned so
    /// the caller may await it; dropping the handle leaves the cycle running.
    pub async fn handle(&self, event: InboundEvent) -> Result<Option<DiscussionHandle>, ReplyError> {
        match event {
            InboundEvent::Message {
                conversation,
                text,
                caption,
            } => {
                match text.as_deref().and_then(Command::parse) {
                    Some(command) => self.handle_command(conversation, command).await,
                    None => {
                        self.handle_message(conversation, text.as_deref(), caption.as_deref())
                            .await
                    }
                }
            }
            InboundEvent::Choice { conversation, data } => {
                self.handle_choice(conversation, &data).await
            }
        }
    }

    async fn say(&self, conversation: ConversationId, notice: Notice) -> Result<(), ReplyError> {
        let language = self.registry.language(conversation);
        self.channel
            .send_text(conversation, &notice.render(language))
            .await
    }

    // ==================== Commands ====================

    async fn handle_command(
        &self,
        conversation: ConversationId,
        command: Command,
    ) -> Result<Option<DiscussionHandle>, ReplyError> {
        debug!("Conversation {}: command {:?}", conversation, command);
        let language = self.registry.language(conversation);

        match command {
            Command::Start => {
                self.registry.reset_conversation(conversation);
                self.say(conversation, Notice::Welcome).await?;
            }
            Command::Chat(Some(topic)) => {
                return self
                    .start_discussion(conversation, &topic, Roster::full_board())
                    .await;
            }
            Command::Chat(None) => {
                self.registry
                    .modes()
                    .set_mode(conversation, Mode::AwaitingChatTopic);
                self.say(conversation, Notice::TopicRequest).await?;
            }
            Command::Ask(Some(spec)) => self.ask(conversation, &spec, Notice::AskFormat).await?,
            Command::Ask(None) => {
                self.registry
                    .modes()
                    .set_mode(conversation, Mode::AwaitingAskInput);
                self.say(conversation, Notice::AskPrompt).await?;
            }
            Command::Team(Some(spec)) => {
                return self.team(conversation, &spec, Notice::TeamFormat).await;
            }
            Command::Team(None) => {
                self.registry
                    .modes()
                    .set_mode(conversation, Mode::AwaitingTeamSpec);
                self.say(conversation, Notice::TeamPrompt).await?;
            }
            Command::Stop => self.scheduler.stop(conversation).await.map_err(into_reply)?,
            Command::Language(Some(tag)) => match tag.parse::<Language>() {
                Ok(chosen) => self.set_language(conversation, chosen).await?,
                Err(_) => self.offer_languages(conversation).await?,
            },
            Command::Language(None) => self.offer_languages(conversation).await?,
            Command::Switch(Some(name)) => match name.parse::<PersonaId>() {
                Ok(persona) => self.switch_speaker(conversation, persona).await?,
                Err(_) => self.say(conversation, Notice::UnknownRole).await?,
            },
            Command::Switch(None) => {
                let choices = Persona::all()
                    .iter()
                    .map(|p| Choice::new(p.label(), format!("{}{}", SWITCH_CHOICE_PREFIX, p.id)))
                    .collect();
                self.channel
                    .send_choices(
                        conversation,
                        &Notice::ChooseSpeaker.render(language),
                        choices,
                    )
                    .await?;
            }
            Command::Current => {
                let persona = self.registry.current_persona(conversation);
                self.say(conversation, Notice::CurrentSpeaker { persona })
                    .await?;
            }
            Command::History => {
                let persona = self.registry.current_persona(conversation);
                let depth = self.registry.depth(conversation);
                let window = self.registry.history().window(conversation, persona, depth);
                if window.is_empty() {
                    self.say(conversation, Notice::HistoryEmpty { persona })
                        .await?;
                } else {
                    self.channel
                        .send_text(
                            conversation,
                            &render_history(language, persona, depth, &window),
                        )
                        .await?;
                }
            }
            Command::Clear => {
                let persona = self.registry.current_persona(conversation);
                self.registry.history().clear(conversation, persona);
                self.say(conversation, Notice::HistoryCleared { persona })
                    .await?;
            }
            Command::Depth(Some(value)) => match value.parse::<HistoryDepth>() {
                Ok(depth) => {
                    self.registry.set_depth(conversation, depth);
                    self.say(conversation, Notice::DepthSet { depth }).await?;
                }
                Err(_) => self.say(conversation, Notice::DepthInvalid).await?,
            },
            Command::Depth(None) => {
                let depth = self.registry.depth(conversation);
                self.say(conversation, Notice::CurrentDepth { depth })
                    .await?;
            }
            Command::Export => match self.registry.history().export(conversation) {
                Some(transcript) => {
                    let file_name = format!(
                        "dialog_history_{}.txt",
                        Local::now().format("%Y%m%d_%H%M%S")
                    );
                    self.channel
                        .send_document(conversation, &file_name, transcript.into_bytes())
                        .await?;
                }
                None => self.say(conversation, Notice::ExportEmpty).await?,
            },
            Command::Stats => {
                let text = self.registry.usage_stats().render(language);
                self.channel.send_text(conversation, &text).await?;
            }
            Command::Search(keywords) => self.search(conversation, keywords.as_deref()).await?,
            Command::Filter(dates) => self.filter(conversation, dates.as_deref()).await?,
            Command::AdminStats => {
                if self.registry.behavior().is_admin(conversation) {
                    let text = self.registry.usage_stats().render(language);
                    self.channel.send_text(conversation, &text).await?;
                } else {
                    info!("Conversation {}: admin statistics refused", conversation);
                    self.say(conversation, Notice::AdminOnly).await?;
                }
            }
            Command::News => {
                self.registry.modes().set_mode(conversation, Mode::NewsMode);
                self.say(conversation, Notice::NewsReady).await?;
            }
            Command::Exit => {
                self.registry.modes().reset_mode(conversation);
                self.say(conversation, Notice::ModeReset).await?;
            }
            Command::Unknown(command) => {
                self.say(conversation, Notice::UnknownCommand { command })
                    .await?;
            }
        }
        Ok(None)
    }

    // ==================== Plain messages ====================

    async fn handle_message(
        &self,
        conversation: ConversationId,
        text: Option<&str>,
        caption: Option<&str>,
    ) -> Result<Option<DiscussionHandle>, ReplyError> {
        let modes = self.registry.modes();
        let mode = modes.current_mode(conversation);

        if mode == Mode::NewsMode {
            let language = self.registry.language(conversation);
            self.news
                .handle(conversation, language, text, caption)
                .await?;
            return Ok(None);
        }

        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            debug!("Conversation {}: ignoring message without text", conversation);
            return Ok(None);
        };

        // Waiting modes are single-shot: consumed whether or not the input parses
        if mode.is_waiting() {
            modes.reset_mode(conversation);
        }

        match mode {
            Mode::AwaitingAskInput => {
                self.ask(conversation, text, Notice::AskFormat).await?;
                Ok(None)
            }
            Mode::AwaitingChatTopic => {
                self.start_discussion(conversation, text, Roster::full_board())
                    .await
            }
            Mode::AwaitingTeamSpec => self.team(conversation, text, Notice::TeamPrompt).await,
            Mode::Normal | Mode::NewsMode => {
                if self.registry.has_active_session(conversation) {
                    debug!(
                        "Conversation {}: discussion active, message ignored",
                        conversation
                    );
                    return Ok(None);
                }
                let persona = self.registry.current_persona(conversation);
                self.reply_as(conversation, persona, text).await?;
                Ok(None)
            }
        }
    }

    // ==================== Choices ====================

    async fn handle_choice(
        &self,
        conversation: ConversationId,
        data: &str,
    ) -> Result<Option<DiscussionHandle>, ReplyError> {
        match data {
            CONTINUE_DISCUSSION => match self.scheduler.continue_discussion(conversation).await {
                Ok(handle) => return Ok(Some(handle)),
                Err(DiscussionError::NotAwaitingContinuation) => {
                    if !self.registry.has_active_session(conversation) {
                        self.say(conversation, Notice::NoDiscussion).await?;
                    }
                }
                Err(e) => return Err(into_reply(e)),
            },
            END_DISCUSSION => self.scheduler.end(conversation).await.map_err(into_reply)?,
            _ => {
                if let Some(tag) = data.strip_prefix(LANGUAGE_CHOICE_PREFIX) {
                    match tag.parse::<Language>() {
                        Ok(language) => self.set_language(conversation, language).await?,
                        Err(e) => warn!("Conversation {}: bad language choice: {}", conversation, e),
                    }
                } else if let Some(name) = data.strip_prefix(SWITCH_CHOICE_PREFIX) {
                    match name.parse::<PersonaId>() {
                        Ok(persona) => self.switch_speaker(conversation, persona).await?,
                        Err(_) => self.say(conversation, Notice::UnknownRole).await?,
                    }
                } else {
                    warn!("Conversation {}: unknown choice '{}'", conversation, data);
                }
            }
        }
        Ok(None)
    }

    // ==================== Actions ====================

    async fn start_discussion(
        &self,
        conversation: ConversationId,
        topic: &str,
        roster: Roster,
    ) -> Result<Option<DiscussionHandle>, ReplyError> {
        match self.scheduler.start(conversation, topic, roster).await {
            Ok(handle) => Ok(Some(handle)),
            Err(DiscussionError::Conflict(_)) => {
                self.say(conversation, Notice::DiscussionAlreadyRunning)
                    .await?;
                Ok(None)
            }
            Err(e) => Err(into_reply(e)),
        }
    }

    /// `<R1,R2,...> <topic>`
    async fn team(
        &self,
        conversation: ConversationId,
        spec: &str,
        format_hint: Notice,
    ) -> Result<Option<DiscussionHandle>, ReplyError> {
        let Some((roles, topic)) = split_first_token(spec).filter(|(_, topic)| !topic.is_empty())
        else {
            self.say(conversation, format_hint).await?;
            return Ok(None);
        };

        let roster = match PersonaId::parse_team(roles).and_then(Roster::team) {
            Ok(roster) => roster,
            Err(DomainError::EmptyRoster) => {
                self.say(conversation, format_hint).await?;
                return Ok(None);
            }
            Err(_) => {
                self.say(conversation, Notice::UnknownRole).await?;
                return Ok(None);
            }
        };
        self.start_discussion(conversation, topic, roster).await
    }

    /// `<ROLE> <question>`
    async fn ask(
        &self,
        conversation: ConversationId,
        spec: &str,
        format_hint: Notice,
    ) -> Result<(), ReplyError> {
        let Some((role, question)) =
            split_first_token(spec).filter(|(_, question)| !question.is_empty())
        else {
            return self.say(conversation, format_hint).await;
        };
        let Ok(persona) = role.parse::<PersonaId>() else {
            return self.say(conversation, Notice::UnknownRole).await;
        };

        self.registry.set_current_persona(conversation, persona);
        self.reply_as(conversation, persona, question).await
    }

    /// One-on-one exchange with `persona`, recorded in its history
    async fn reply_as(
        &self,
        conversation: ConversationId,
        persona: PersonaId,
        input: &str,
    ) -> Result<(), ReplyError> {
        let language = self.registry.language(conversation);
        let depth = self.registry.depth(conversation);
        let history = self.registry.history().window(conversation, persona, depth);
        let request = PromptBuilder::build(input, persona, language, None, &history, depth);

        let turn = self
            .dispatcher
            .generate(conversation, persona, language, &request)
            .await;

        if turn.succeeded {
            self.registry.history().append(
                conversation,
                persona,
                HistoryEntry::new(input, turn.text.clone()),
            );
        }
        self.registry.record_usage(persona);
        self.channel
            .send_text(conversation, &persona_reply(persona, &turn.text))
            .await
    }

    async fn search(
        &self,
        conversation: ConversationId,
        keywords: Option<&str>,
    ) -> Result<(), ReplyError> {
        let Some(keywords) = keywords else {
            return self.say(conversation, Notice::SearchNoKeywords).await;
        };
        let matches = self.registry.history().search(conversation, keywords);
        if matches.is_empty() {
            return self.say(conversation, Notice::SearchNoResults).await;
        }
        let language = self.registry.language(conversation);
        self.channel
            .send_text(
                conversation,
                &render_matches(language, ResultsKind::Search, &matches),
            )
            .await
    }

    async fn filter(
        &self,
        conversation: ConversationId,
        dates: Option<&str>,
    ) -> Result<(), ReplyError> {
        let mut parts = dates.unwrap_or_default().split_whitespace();
        let (Some(start), Some(end)) = (parts.next(), parts.next()) else {
            return self.say(conversation, Notice::FilterNoDates).await;
        };
        let Ok(range) = DateRange::parse(start, end) else {
            return self.say(conversation, Notice::FilterInvalidDates).await;
        };

        let matches = self.registry.history().filter_by_date(conversation, &range);
        if matches.is_empty() {
            return self.say(conversation, Notice::FilterNoResults).await;
        }
        let language = self.registry.language(conversation);
        self.channel
            .send_text(
                conversation,
                &render_matches(language, ResultsKind::Filter, &matches),
            )
            .await
    }

    async fn set_language(
        &self,
        conversation: ConversationId,
        language: Language,
    ) -> Result<(), ReplyError> {
        self.registry.set_language(conversation, language);
        self.say(conversation, Notice::LanguageChanged).await
    }

    async fn offer_languages(&self, conversation: ConversationId) -> Result<(), ReplyError> {
        let language = self.registry.language(conversation);
        let choices = Language::all()
            .iter()
            .map(|l| Choice::new(l.button_label(), format!("{}{}", LANGUAGE_CHOICE_PREFIX, l)))
            .collect();
        self.channel
            .send_choices(conversation, &Notice::ChooseLanguage.render(language), choices)
            .await
    }

    async fn switch_speaker(
        &self,
        conversation: ConversationId,
        persona: PersonaId,
    ) -> Result<(), ReplyError> {
        self.registry.set_current_persona(conversation, persona);
        self.say(conversation, Notice::SpeakerChanged { persona })
            .await
    }
}

fn into_reply(error: DiscussionError) -> ReplyError {
    match error {
        DiscussionError::Reply(e) => e,
        other => ReplyError::Delivery(other.to_string()),
    }
}
