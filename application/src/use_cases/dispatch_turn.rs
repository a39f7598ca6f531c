//! Backend dispatch
//!
//! Routes a persona's request to the backend bound to it, cleans up the
//! reply, and folds every failure into short localized turn text. Nothing
//! here retries or falls back to another provider.

use crate::ports::llm_backend::{GatewayError, LlmBackend};
use crate::ports::progress::{NoProgress, TurnNotifier};
use boardroom_domain::{
    preview, ConversationId, GenerationRequest, Language, Notice, Persona, PersonaId, ProviderKind,
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*").expect("static pattern"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("static pattern"));
static TEXT_BLOCK_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[?TextBlock\((?:citations=None,\s*)?text=['"]?"#).expect("static pattern")
});
static TEXT_BLOCK_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]?,\s*type='text'\)\]?$"#).expect("static pattern"));

/// Result of one dispatched turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnText {
    pub text: String,
    /// False when `text` is the localized error line
    pub succeeded: bool,
}

pub struct BackendDispatcher {
    backends: HashMap<ProviderKind, Arc<dyn LlmBackend>>,
    notifier: Arc<dyn TurnNotifier>,
}

impl BackendDispatcher {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
            notifier: Arc::new(NoProgress),
        }
    }

    /// Register `backend` under its own provider kind (replacing any earlier one)
    pub fn with_backend(mut self, backend: Arc<dyn LlmBackend>) -> Self {
        self.backends.insert(backend.kind(), backend);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn TurnNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn has_backend(&self, kind: ProviderKind) -> bool {
        self.backends.contains_key(&kind)
    }

    /// Generate `persona`'s reply. Never fails: errors come back as turn text.
    pub async fn generate(
        &self,
        conversation: ConversationId,
        persona: PersonaId,
        language: Language,
        request: &GenerationRequest,
    ) -> TurnText {
        let provider = Persona::get(persona).provider;
        self.notifier.on_turn_start(conversation, persona);

        let outcome = match self.generate_raw(provider, request).await {
            Ok(raw) => {
                let text = normalize(provider, &raw);
                debug!(
                    "{} via {} replied: {}...",
                    persona,
                    provider,
                    preview(&text, 50)
                );
                TurnText {
                    text,
                    succeeded: true,
                }
            }
            Err(e) => {
                warn!("{} via {} failed: {}", persona, provider, e);
                TurnText {
                    text: Notice::BackendError {
                        detail: e.to_string(),
                    }
                    .render(language),
                    succeeded: false,
                }
            }
        };

        self.notifier
            .on_turn_complete(conversation, persona, outcome.succeeded);
        outcome
    }

    /// Call a provider directly, without normalization or error folding
    pub async fn generate_raw(
        &self,
        provider: ProviderKind,
        request: &GenerationRequest,
    ) -> Result<String, GatewayError> {
        let backend = self
            .backends
            .get(&provider)
            .ok_or(GatewayError::NotConfigured(provider))?;
        backend.generate(request).await
    }
}

impl Default for BackendDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Clean up provider output for display
pub fn normalize(provider: ProviderKind, raw: &str) -> String {
    let mut text = raw.trim().to_string();

    if provider == ProviderKind::Anthropic {
        text = TEXT_BLOCK_HEAD.replace(&text, "").into_owned();
        text = TEXT_BLOCK_TAIL.replace(&text, "").into_owned();
        text = text.replace("\\n", "\n");
    }

    text = BOLD.replace_all(&text, "").into_owned();
    text = BLANK_RUN.replace_all(&text, "\n\n").into_owned();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedBackend {
        kind: ProviderKind,
        reply: Result<String, String>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl FixedBackend {
        fn ok(kind: ProviderKind, reply: &str) -> Arc<Self> {
            Arc::new(Self {
                kind,
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(kind: ProviderKind, message: &str) -> Arc<Self> {
            Arc::new(Self {
                kind,
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmBackend for FixedBackend {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply
                .clone()
                .map_err(GatewayError::ConnectionError)
        }
    }

    const CONV: ConversationId = ConversationId::new(5);

    #[tokio::test]
    async fn test_routes_by_persona_binding() {
        let openai = FixedBackend::ok(ProviderKind::OpenAi, "from openai");
        let gemini = FixedBackend::ok(ProviderKind::Gemini, "from gemini");
        let dispatcher = BackendDispatcher::new()
            .with_backend(openai.clone())
            .with_backend(gemini.clone());

        let request = GenerationRequest::new("sys", "q");
        let cfo = dispatcher
            .generate(CONV, PersonaId::Cfo, Language::En, &request)
            .await;
        let ceo = dispatcher
            .generate(CONV, PersonaId::Ceo, Language::En, &request)
            .await;

        assert_eq!(cfo.text, "from gemini");
        assert_eq!(ceo.text, "from openai");
        assert_eq!(gemini.seen.lock().unwrap().len(), 1);
        assert_eq!(openai.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_localized_text() {
        let dispatcher = BackendDispatcher::new()
            .with_backend(FixedBackend::failing(ProviderKind::Xai, "refused"));
        let request = GenerationRequest::new("sys", "q");

        let en = dispatcher
            .generate(CONV, PersonaId::Cmo, Language::En, &request)
            .await;
        assert!(!en.succeeded);
        assert_eq!(en.text, "Error: Connection error: refused");

        let ru = dispatcher
            .generate(CONV, PersonaId::Cmo, Language::Ru, &request)
            .await;
        assert!(ru.text.starts_with("Ошибка: "));
    }

    #[tokio::test]
    async fn test_missing_backend_is_not_fatal() {
        let dispatcher = BackendDispatcher::new();
        let outcome = dispatcher
            .generate(
                CONV,
                PersonaId::Cto,
                Language::En,
                &GenerationRequest::new("sys", "q"),
            )
            .await;

        assert!(!outcome.succeeded);
        assert!(outcome.text.contains("anthropic"));
    }

    #[test]
    fn test_normalize_strips_markup_and_blank_runs() {
        let raw = "  **Plan**:\n\n\n\nBuy more.\n\n\nDone  ";
        assert_eq!(
            normalize(ProviderKind::Gemini, raw),
            "Plan:\n\nBuy more.\n\nDone"
        );
    }

    #[test]
    fn test_normalize_unwraps_text_block_artifacts() {
        let raw = "[TextBlock(citations=None, text='Ship it.\\nThen measure.', type='text')]";
        assert_eq!(
            normalize(ProviderKind::Anthropic, raw),
            "Ship it.\nThen measure."
        );
    }

    #[test]
    fn test_normalize_leaves_backslashes_of_other_providers() {
        assert_eq!(normalize(ProviderKind::OpenAi, r"C:\new"), r"C:\new");
    }
}
