//! News analysis desk
//!
//! In news mode every message is treated as a news item. Five analysts read
//! it in turn through the OpenAI-bound backend and the desk replies with one
//! combined trading-signal report.

use crate::ports::llm_backend::GatewayError;
use crate::ports::reply_channel::{ReplyChannel, ReplyError};
use crate::use_cases::dispatch_turn::{normalize, BackendDispatcher};
use boardroom_domain::news::{self, ANALYST_SYSTEM_PROMPT, ANALYST_TEMPERATURE};
use boardroom_domain::{Analyst, ConversationId, GenerationRequest, Language, Notice, ProviderKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Provider every analyst is bound to
pub const ANALYST_PROVIDER: ProviderKind = ProviderKind::OpenAi;

pub struct NewsDesk {
    dispatcher: Arc<BackendDispatcher>,
    channel: Arc<dyn ReplyChannel>,
}

impl NewsDesk {
    pub fn new(dispatcher: Arc<BackendDispatcher>, channel: Arc<dyn ReplyChannel>) -> Self {
        Self {
            dispatcher,
            channel,
        }
    }

    /// Analyse one news item (message text, or the media caption when there
    /// is no text)
    pub async fn handle(
        &self,
        conversation: ConversationId,
        language: Language,
        text: Option<&str>,
        caption: Option<&str>,
    ) -> Result<(), ReplyError> {
        let news = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| caption.map(str::trim).filter(|c| !c.is_empty()));
        let Some(news) = news else {
            return self
                .channel
                .send_text(conversation, &Notice::NewsNoText.render(language))
                .await;
        };

        self.channel
            .send_text(conversation, &Notice::NewsAnalyzing.render(language))
            .await?;

        let reply = match self.analyse(news).await {
            Ok(analyses) => {
                info!("Conversation {}: news analysed", conversation);
                news::report(&analyses)
            }
            Err(e) => {
                warn!("Conversation {}: news analysis failed: {}", conversation, e);
                Notice::NewsFailed {
                    detail: e.to_string(),
                }
                .render(language)
            }
        };
        self.channel.send_text(conversation, &reply).await
    }

    async fn analyse(&self, news: &str) -> Result<Vec<(Analyst, String)>, GatewayError> {
        let mut analyses = Vec::with_capacity(Analyst::ALL.len());
        for analyst in Analyst::ALL {
            let request = GenerationRequest::new(ANALYST_SYSTEM_PROMPT, analyst.prompt(news))
                .with_temperature(ANALYST_TEMPERATURE);
            let raw = self
                .dispatcher
                .generate_raw(ANALYST_PROVIDER, &request)
                .await?;
            analyses.push((analyst, normalize(ANALYST_PROVIDER, &raw)));
        }
        Ok(analyses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{counting_dispatcher, RecordingChannel};

    const CONV: ConversationId = ConversationId::new(9);

    #[tokio::test]
    async fn test_report_covers_all_analysts() {
        let (dispatcher, backends) = counting_dispatcher(None);
        let channel = RecordingChannel::new();
        let desk = NewsDesk::new(Arc::new(dispatcher), channel.clone());

        desk.handle(CONV, Language::En, Some("Fed cuts rates"), None)
            .await
            .unwrap();

        let requests = backends.requests();
        assert_eq!(requests.len(), 5);
        for (kind, request) in &requests {
            assert_eq!(*kind, ProviderKind::OpenAi);
            assert_eq!(request.system_prompt, ANALYST_SYSTEM_PROMPT);
            assert!(request.user_turn.contains("Fed cuts rates"));
        }

        let texts = channel.texts(CONV);
        assert_eq!(texts[0], "🔄 Analyzing the news...");
        for analyst in Analyst::ALL {
            assert!(texts[1].contains(analyst.title()));
        }
        assert!(texts[1].contains("answer 5"));
    }

    #[tokio::test]
    async fn test_caption_is_used_without_text() {
        let (dispatcher, backends) = counting_dispatcher(None);
        let channel = RecordingChannel::new();
        let desk = NewsDesk::new(Arc::new(dispatcher), channel.clone());

        desk.handle(CONV, Language::En, None, Some("Oil spikes"))
            .await
            .unwrap();

        assert!(backends.user_turns()[0].contains("Oil spikes"));
    }

    #[tokio::test]
    async fn test_missing_text_is_reported() {
        let (dispatcher, backends) = counting_dispatcher(None);
        let channel = RecordingChannel::new();
        let desk = NewsDesk::new(Arc::new(dispatcher), channel.clone());

        desk.handle(CONV, Language::Ru, Some("  "), None).await.unwrap();

        assert!(backends.requests().is_empty());
        assert_eq!(
            channel.texts(CONV),
            vec![Notice::NewsNoText.render(Language::Ru)]
        );
    }

    #[tokio::test]
    async fn test_backend_failure_is_reported_once() {
        let channel = RecordingChannel::new();
        let desk = NewsDesk::new(Arc::new(BackendDispatcher::new()), channel.clone());

        desk.handle(CONV, Language::En, Some("news"), None)
            .await
            .unwrap();

        let texts = channel.texts(CONV);
        assert_eq!(texts.len(), 2);
        assert!(texts[1].starts_with("An error occurred during analysis:"));
    }
}
