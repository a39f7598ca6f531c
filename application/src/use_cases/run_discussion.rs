//! Run Discussion use case
//!
//! Drives a round-robin discussion: every participant speaks once per cycle,
//! each turn conditioned on the most recent turns, and after a full cycle the
//! user decides whether to continue.
//!
//! ```text
//! Idle ──start──▶ Running ──cycle done──▶ AwaitingContinuation
//!                    ▲                         │
//!                    └──────continue───────────┤
//!                                              └──end──▶ Idle
//! ```
//!
//! `stop` cancels from any state. Each cycle runs as one spawned task whose
//! [`CancellationToken`] lives in the registry session; the task checks it
//! before each turn and after each backend call.

use crate::ports::reply_channel::{Choice, ReplyChannel, ReplyError};
use crate::session::registry::{DiscussionSession, SessionConflict, SessionRegistry};
use crate::use_cases::build_prompt::PromptBuilder;
use crate::use_cases::dispatch_turn::BackendDispatcher;
use boardroom_domain::locale::{continuation_labels, persona_reply};
use boardroom_domain::{
    preview, ConversationId, DiscussionState, DiscussionTurn, Language, Notice, PromptTemplate,
    Roster,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Choice payload: run another cycle
pub const CONTINUE_DISCUSSION: &str = "continue_discussion";
/// Choice payload: finish the discussion
pub const END_DISCUSSION: &str = "end_discussion";

#[derive(Error, Debug)]
pub enum DiscussionError {
    #[error(transparent)]
    Conflict(#[from] SessionConflict),

    #[error("No discussion is waiting for continuation")]
    NotAwaitingContinuation,

    #[error("Reply channel failed: {0}")]
    Reply(#[from] ReplyError),
}

/// Handle to the task running the current cycle
pub struct DiscussionHandle {
    pub token: CancellationToken,
    pub task: JoinHandle<()>,
}

impl DiscussionHandle {
    /// Wait for the cycle task to finish
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!("Discussion task ended abnormally: {}", e);
        }
    }
}

/// Schedules discussion cycles; cheap to clone
#[derive(Clone)]
pub struct DiscussionScheduler {
    registry: Arc<SessionRegistry>,
    dispatcher: Arc<BackendDispatcher>,
    channel: Arc<dyn ReplyChannel>,
}

impl DiscussionScheduler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        dispatcher: Arc<BackendDispatcher>,
        channel: Arc<dyn ReplyChannel>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            channel,
        }
    }

    /// Register a discussion of `topic` and launch its first cycle
    pub async fn start(
        &self,
        conversation: ConversationId,
        topic: &str,
        roster: Roster,
    ) -> Result<DiscussionHandle, DiscussionError> {
        let language = self.registry.language(conversation);
        let notice = match roster.restriction() {
            Some(members) => Notice::TeamStarted {
                topic: topic.to_string(),
                members: members.to_vec(),
            },
            None => Notice::DiscussionStarted {
                topic: topic.to_string(),
            },
        };

        let session = DiscussionSession::new(
            roster,
            topic,
            self.registry.behavior().context_window,
        );
        let token = self.registry.register_session(conversation, session)?;
        info!(
            "Conversation {}: starting discussion on '{}'",
            conversation,
            preview(topic, 80)
        );

        if let Err(e) = self
            .channel
            .send_text(conversation, &notice.render(language))
            .await
        {
            self.registry.clear_session(conversation);
            return Err(e.into());
        }

        Ok(self.spawn_cycle(conversation, token))
    }

    /// Run another cycle on the last response of the previous one
    pub async fn continue_discussion(
        &self,
        conversation: ConversationId,
    ) -> Result<DiscussionHandle, DiscussionError> {
        let language = self.registry.language(conversation);
        let token = self
            .registry
            .with_session(conversation, |session| {
                if session.state != DiscussionState::AwaitingContinuation {
                    return None;
                }
                if let Some(last) = session.context.last() {
                    session.topic = PromptTemplate::continuation_topic(language, &last.response);
                }
                session.context.clear();
                session.messages_emitted = 0;
                session.state = DiscussionState::Running;
                Some(session.token.clone())
            })
            .flatten()
            .ok_or(DiscussionError::NotAwaitingContinuation)?;

        info!("Conversation {}: discussion continues", conversation);
        self.channel
            .send_text(conversation, &Notice::DiscussionContinues.render(language))
            .await?;
        Ok(self.spawn_cycle(conversation, token))
    }

    /// Finish the discussion; later messages go to one-on-one chat
    pub async fn end(&self, conversation: ConversationId) -> Result<(), DiscussionError> {
        let language = self.registry.language(conversation);
        let notice = match self.registry.clear_session(conversation) {
            Some(_) => Notice::DiscussionEnded,
            None => Notice::NoDiscussion,
        };
        self.registry.modes().reset_mode(conversation);
        info!("Conversation {}: discussion ended", conversation);
        self.channel
            .send_text(conversation, &notice.render(language))
            .await?;
        Ok(())
    }

    /// Cancel the discussion and forget the conversation's history
    pub async fn stop(&self, conversation: ConversationId) -> Result<(), DiscussionError> {
        let language = self.registry.language(conversation);
        if self.registry.clear_session(conversation).is_some() {
            info!("Conversation {}: discussion stopped", conversation);
        }
        self.registry.modes().reset_mode(conversation);
        self.registry.history().clear_conversation(conversation);
        self.registry.clear_current_persona(conversation);
        self.channel
            .send_text(conversation, &Notice::DiscussionStopped.render(language))
            .await?;
        Ok(())
    }

    fn spawn_cycle(&self, conversation: ConversationId, token: CancellationToken) -> DiscussionHandle {
        let scheduler = self.clone();
        let cycle_token = token.clone();
        let task = tokio::spawn(async move {
            scheduler.run_cycle(conversation, cycle_token).await;
        });
        DiscussionHandle { token, task }
    }

    async fn run_cycle(&self, conversation: ConversationId, token: CancellationToken) {
        let Err(e) = self.drive_cycle(conversation, &token).await else {
            return;
        };
        if token.is_cancelled() {
            debug!(
                "Conversation {}: error after cancellation ignored: {}",
                conversation, e
            );
            return;
        }

        warn!("Conversation {}: discussion aborted: {}", conversation, e);
        self.registry.clear_session(conversation);
        self.registry.modes().reset_mode(conversation);
        let language = self.registry.language(conversation);
        if let Err(e) = self
            .channel
            .send_text(conversation, &Notice::DiscussionFailed.render(language))
            .await
        {
            warn!(
                "Conversation {}: could not deliver apology: {}",
                conversation, e
            );
        }
    }

    fn is_live(&self, conversation: ConversationId, token: &CancellationToken) -> bool {
        !token.is_cancelled() && self.registry.has_active_session(conversation)
    }

    async fn drive_cycle(
        &self,
        conversation: ConversationId,
        token: &CancellationToken,
    ) -> Result<(), DiscussionError> {
        let registry = &self.registry;
        let language = registry.language(conversation);
        let depth = registry.depth(conversation);
        let pacing = registry.behavior().pacing;

        let Some(roster) = registry.with_session(conversation, |s| s.roster.clone()) else {
            return Ok(());
        };

        for persona in roster.members().iter().copied() {
            if !self.is_live(conversation, token) {
                return Ok(());
            }

            let Some(Some(input)) = registry.with_session(conversation, |s| {
                (!token.is_cancelled())
                    .then(|| PromptBuilder::discussion_input(language, &s.topic, &s.context))
            }) else {
                return Ok(());
            };
            let history = registry.history().window(conversation, persona, depth);
            let request = PromptBuilder::build(
                &input,
                persona,
                language,
                roster.restriction(),
                &history,
                depth,
            );

            debug!("Conversation {}: requesting {}", conversation, persona);
            let turn = self
                .dispatcher
                .generate(conversation, persona, language, &request)
                .await;

            if !self.is_live(conversation, token) {
                debug!(
                    "Conversation {}: discarding reply of {} after cancellation",
                    conversation, persona
                );
                return Ok(());
            }

            // A session registered after cancellation must not receive this reply
            let Some(Some(cycle_done)) = registry.with_session(conversation, |s| {
                if token.is_cancelled() {
                    return None;
                }
                s.context.push(DiscussionTurn::new(persona, turn.text.clone()));
                s.messages_emitted += 1;
                let done = s.cycle_complete();
                if done {
                    s.state = DiscussionState::AwaitingContinuation;
                }
                Some(done)
            }) else {
                return Ok(());
            };

            self.channel
                .send_text(conversation, &persona_reply(persona, &turn.text))
                .await?;
            registry.record_usage(persona);

            if cycle_done {
                self.offer_continuation(conversation, language).await?;
                return Ok(());
            }

            if !pacing.is_zero() {
                tokio::select! {
                    _ = token.cancelled() => return Ok(()),
                    _ = tokio::time::sleep(pacing) => {}
                }
            }
        }

        Ok(())
    }

    async fn offer_continuation(
        &self,
        conversation: ConversationId,
        language: Language,
    ) -> Result<(), DiscussionError> {
        debug!("Conversation {}: cycle complete", conversation);
        let (continue_label, end_label) = continuation_labels(language);
        self.channel
            .send_choices(
                conversation,
                &Notice::CycleCompleted.render(language),
                vec![
                    Choice::new(continue_label, CONTINUE_DISCUSSION),
                    Choice::new(end_label, END_DISCUSSION),
                ],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BehaviorConfig;
    use crate::testing::{
        counting_dispatcher, counting_dispatcher_failing, Backends, RecordingChannel, Sent,
    };
    use boardroom_domain::{HistoryEntry, PersonaId};
    use std::time::Duration;

    const CONV: ConversationId = ConversationId::new(77);

    struct Fixture {
        registry: Arc<SessionRegistry>,
        channel: Arc<RecordingChannel>,
        backends: Backends,
        scheduler: DiscussionScheduler,
    }

    fn fixture_with(
        behavior: BehaviorConfig,
        hold_call: Option<usize>,
        channel: Arc<RecordingChannel>,
    ) -> Fixture {
        let registry = Arc::new(SessionRegistry::new(behavior));
        let (dispatcher, backends) = counting_dispatcher(hold_call);
        let scheduler = DiscussionScheduler::new(
            registry.clone(),
            Arc::new(dispatcher),
            channel.clone(),
        );
        Fixture {
            registry,
            channel,
            backends,
            scheduler,
        }
    }

    fn fixture() -> Fixture {
        let behavior = BehaviorConfig::default()
            .with_pacing(Duration::ZERO)
            .with_default_language(Language::En);
        fixture_with(behavior, None, RecordingChannel::new())
    }

    #[tokio::test]
    async fn test_full_board_cycle_then_continuation_prompt() {
        let f = fixture();
        let handle = f
            .scheduler
            .start(CONV, "rates", Roster::full_board())
            .await
            .unwrap();
        handle.join().await;

        let texts = f.channel.texts(CONV);
        assert_eq!(texts[0], "📋 Starting discussion on topic: rates");
        assert_eq!(texts.len(), 1 + PersonaId::ALL.len());
        assert_eq!(texts[1], "👨‍💼 CEO:\nanswer 1");
        assert_eq!(texts[8], "🎯 CRO:\nanswer 8");

        match f.channel.sent().last().unwrap() {
            Sent::Choices(_, prompt, choices) => {
                assert_eq!(prompt, "Discussion cycle completed. Would you like to continue?");
                let data: Vec<_> = choices.iter().map(|c| c.data.as_str()).collect();
                assert_eq!(data, vec![CONTINUE_DISCUSSION, END_DISCUSSION]);
            }
            other => panic!("expected choices, got {other:?}"),
        }

        let state = f.registry.with_session(CONV, |s| (s.state, s.messages_emitted));
        assert_eq!(state, Some((DiscussionState::AwaitingContinuation, 8)));
        assert_eq!(f.registry.usage_stats().total_messages, 8);
    }

    #[tokio::test]
    async fn test_turns_quote_at_most_three_previous_turns() {
        let f = fixture();
        f.scheduler
            .start(CONV, "rates", Roster::full_board())
            .await
            .unwrap()
            .join()
            .await;

        let turns = f.backends.user_turns();
        assert_eq!(turns[0], "Discussion topic: rates");
        assert_eq!(
            turns[1],
            "Topic: rates\n\nPrevious responses:\nCEO: answer 1\n\n\
             Your response considering previous messages:"
        );
        assert!(turns[4].contains("CMO: answer 2\nCTO: answer 3\nCFO: answer 4"));
        assert!(!turns[4].contains("CEO: answer 1"));
    }

    #[tokio::test]
    async fn test_turns_route_to_bound_providers() {
        use boardroom_domain::ProviderKind;

        let f = fixture();
        f.scheduler
            .start(CONV, "rates", Roster::full_board())
            .await
            .unwrap()
            .join()
            .await;

        let providers: Vec<_> = f.backends.requests().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            providers,
            vec![
                ProviderKind::OpenAi,
                ProviderKind::Xai,
                ProviderKind::Anthropic,
                ProviderKind::Gemini,
                ProviderKind::OpenAi,
                ProviderKind::OpenAi,
                ProviderKind::OpenAi,
                ProviderKind::OpenAi,
            ]
        );
    }

    #[tokio::test]
    async fn test_second_start_is_rejected() {
        let f = fixture();
        let handle = f
            .scheduler
            .start(CONV, "one", Roster::full_board())
            .await
            .unwrap();

        let err = f
            .scheduler
            .start(CONV, "two", Roster::full_board())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DiscussionError::Conflict(_)));
        handle.join().await;

        // Still blocked while awaiting continuation
        assert!(f
            .scheduler
            .start(CONV, "three", Roster::full_board())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_team_discussion_uses_only_members() {
        let f = fixture();
        let roster = Roster::team(vec![PersonaId::Cfo, PersonaId::Ceo]).unwrap();
        f.scheduler
            .start(CONV, "budget", roster)
            .await
            .unwrap()
            .join()
            .await;

        let texts = f.channel.texts(CONV);
        assert!(texts[0].contains("Participants:\n💰 CFO, 👨‍💼 CEO"));
        assert_eq!(texts[1], "💰 CFO:\nanswer 1");
        assert_eq!(texts[2], "👨‍💼 CEO:\nanswer 2");
        assert_eq!(texts.len(), 3);

        for (_, request) in f.backends.requests() {
            assert!(request
                .system_prompt
                .contains("Only following roles participate in discussion: CFO, CEO"));
        }
    }

    #[tokio::test]
    async fn test_backend_error_becomes_turn_and_cycle_goes_on() {
        let behavior = BehaviorConfig::default()
            .with_pacing(Duration::ZERO)
            .with_default_language(Language::En);
        let registry = Arc::new(SessionRegistry::new(behavior));
        let (dispatcher, _backends) = counting_dispatcher_failing(None, Some(2));
        let channel = RecordingChannel::new();
        let scheduler =
            DiscussionScheduler::new(registry.clone(), Arc::new(dispatcher), channel.clone());

        let roster = Roster::team(vec![PersonaId::Ceo, PersonaId::Cto, PersonaId::Cfo]).unwrap();
        scheduler
            .start(CONV, "vendors", roster)
            .await
            .unwrap()
            .join()
            .await;

        let texts = channel.texts(CONV);
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[1], "👨‍💼 CEO:\nanswer 1");
        assert!(texts[2].contains("CTO:\nError: "));
        assert!(texts[2].contains("refused"));
        assert_eq!(texts[3], "💰 CFO:\nanswer 3");

        assert!(matches!(channel.sent().last(), Some(Sent::Choices(..))));
        assert_eq!(registry.with_session(CONV, |s| s.messages_emitted), Some(3));
    }

    #[tokio::test]
    async fn test_continue_restarts_cycle_on_last_response() {
        let f = fixture();
        let roster = Roster::team(vec![PersonaId::Ceo, PersonaId::Cto]).unwrap();
        f.scheduler
            .start(CONV, "cloud", roster)
            .await
            .unwrap()
            .join()
            .await;

        f.scheduler
            .continue_discussion(CONV)
            .await
            .unwrap()
            .join()
            .await;

        let turns = f.backends.user_turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(
            turns[2],
            "Discussion topic: Continue the discussion, considering previous responses. \
             Develop the last thought: answer 2"
        );
        assert!(f.channel.texts(CONV).contains(&"Discussion continues...".to_string()));
        assert_eq!(
            f.registry.with_session(CONV, |s| s.messages_emitted),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_continue_requires_finished_cycle() {
        let f = fixture();
        let err = f.scheduler.continue_discussion(CONV).await.err().unwrap();
        assert!(matches!(err, DiscussionError::NotAwaitingContinuation));
    }

    #[tokio::test]
    async fn test_end_discards_session() {
        let f = fixture();
        f.scheduler
            .start(CONV, "x", Roster::team(vec![PersonaId::Clo]).unwrap())
            .await
            .unwrap()
            .join()
            .await;

        f.scheduler.end(CONV).await.unwrap();

        assert!(!f.registry.has_active_session(CONV));
        assert!(f
            .channel
            .last_text(CONV)
            .unwrap()
            .starts_with("Group discussion finished."));
    }

    #[tokio::test]
    async fn test_stop_discards_in_flight_reply() {
        let behavior = BehaviorConfig::default()
            .with_pacing(Duration::ZERO)
            .with_default_language(Language::En);
        let f = fixture_with(behavior, Some(2), RecordingChannel::new());
        f.registry
            .history()
            .append(CONV, PersonaId::Ceo, HistoryEntry::new("q", "a"));

        let handle = f
            .scheduler
            .start(CONV, "risk", Roster::full_board())
            .await
            .unwrap();
        f.backends.reached_hold.notified().await;

        f.scheduler.stop(CONV).await.unwrap();
        f.backends.release.notify_one();
        handle.join().await;

        let texts = f.channel.texts(CONV);
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[1], "👨‍💼 CEO:\nanswer 1");
        assert!(texts[2].starts_with("🛑 Discussion stopped!"));
        assert!(!texts.iter().any(|t| t.contains("answer 2")));
        assert!(f.registry.history().is_empty(CONV));
        assert!(!f.registry.has_active_session(CONV));
    }

    #[tokio::test]
    async fn test_stale_reply_skips_successor_session() {
        let behavior = BehaviorConfig::default()
            .with_pacing(Duration::ZERO)
            .with_default_language(Language::En);
        let f = fixture_with(behavior, Some(2), RecordingChannel::new());

        let stale = f
            .scheduler
            .start(CONV, "risk", Roster::full_board())
            .await
            .unwrap();
        f.backends.reached_hold.notified().await;
        f.scheduler.stop(CONV).await.unwrap();

        f.scheduler
            .start(CONV, "fresh", Roster::team(vec![PersonaId::Ceo]).unwrap())
            .await
            .unwrap()
            .join()
            .await;
        f.backends.release.notify_one();
        stale.join().await;

        let (responses, emitted) = f
            .registry
            .with_session(CONV, |s| {
                let responses: Vec<_> =
                    s.context.recent().map(|t| t.response.clone()).collect();
                (responses, s.messages_emitted)
            })
            .unwrap();
        assert_eq!(responses, vec!["answer 3".to_string()]);
        assert_eq!(emitted, 1);
        assert!(!f.channel.texts(CONV).iter().any(|t| t.contains("answer 2")));
    }

    #[tokio::test]
    async fn test_stop_interrupts_pacing_sleep() {
        let behavior = BehaviorConfig::default()
            .with_pacing(Duration::from_secs(3600))
            .with_default_language(Language::En);
        let f = fixture_with(behavior, None, RecordingChannel::new());

        let handle = f
            .scheduler
            .start(CONV, "slow", Roster::full_board())
            .await
            .unwrap();
        f.channel.wait_for(2).await;
        f.scheduler.stop(CONV).await.unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle.join())
            .await
            .expect("cycle task should stop promptly");
        assert_eq!(f.backends.user_turns().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_tears_down_only_that_session() {
        let behavior = BehaviorConfig::default()
            .with_pacing(Duration::ZERO)
            .with_default_language(Language::En);
        // Attempt 1 is the start notice, attempt 2 the first persona turn
        let f = fixture_with(behavior, None, RecordingChannel::failing_on(2));
        let other = ConversationId::new(78);

        f.scheduler
            .start(CONV, "doomed", Roster::full_board())
            .await
            .unwrap()
            .join()
            .await;

        assert!(!f.registry.has_active_session(CONV));
        assert_eq!(
            f.channel.last_text(CONV).unwrap(),
            "An error occurred. Discussion stopped."
        );

        f.scheduler
            .start(other, "fine", Roster::team(vec![PersonaId::Ceo]).unwrap())
            .await
            .unwrap()
            .join()
            .await;
        assert!(f.registry.has_active_session(other));
    }
}
