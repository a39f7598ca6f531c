//! Test doubles shared by the use-case tests

use crate::ports::llm_backend::{GatewayError, LlmBackend};
use crate::ports::reply_channel::{Choice, ReplyChannel, ReplyError};
use crate::use_cases::dispatch_turn::BackendDispatcher;
use async_trait::async_trait;
use boardroom_domain::{ConversationId, GenerationRequest, ProviderKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub type RequestLog = Arc<Mutex<Vec<(ProviderKind, GenerationRequest)>>>;

/// Replies `**answer <n>**`, numbering calls across all providers
pub struct CountingBackend {
    kind: ProviderKind,
    log: RequestLog,
    counter: Arc<AtomicUsize>,
    /// 1-based call number that blocks until `release` is notified
    hold_call: Option<usize>,
    /// 1-based call number that fails with a connection error
    fail_call: Option<usize>,
    pub reached_hold: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[async_trait]
impl LlmBackend for CountingBackend {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.lock().unwrap().push((self.kind, request.clone()));
        if self.hold_call == Some(n) {
            self.reached_hold.notify_one();
            self.release.notified().await;
        }
        if self.fail_call == Some(n) {
            return Err(GatewayError::ConnectionError("refused".to_string()));
        }
        Ok(format!("**answer {n}**"))
    }
}

pub struct Backends {
    pub log: RequestLog,
    pub reached_hold: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl Backends {
    pub fn user_turns(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.user_turn.clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<(ProviderKind, GenerationRequest)> {
        self.log.lock().unwrap().clone()
    }
}

/// Dispatcher with a counting backend for every provider
pub fn counting_dispatcher(hold_call: Option<usize>) -> (BackendDispatcher, Backends) {
    counting_dispatcher_failing(hold_call, None)
}

/// Like [`counting_dispatcher`], but call `fail_call` returns an error
pub fn counting_dispatcher_failing(
    hold_call: Option<usize>,
    fail_call: Option<usize>,
) -> (BackendDispatcher, Backends) {
    let log: RequestLog = Arc::default();
    let counter = Arc::new(AtomicUsize::new(0));
    let reached_hold = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());

    let dispatcher = ProviderKind::ALL
        .iter()
        .fold(BackendDispatcher::new(), |dispatcher, kind| {
            dispatcher.with_backend(Arc::new(CountingBackend {
                kind: *kind,
                log: log.clone(),
                counter: counter.clone(),
                hold_call,
                fail_call,
                reached_hold: reached_hold.clone(),
                release: release.clone(),
            }))
        });

    (
        dispatcher,
        Backends {
            log,
            reached_hold,
            release,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(ConversationId, String),
    Choices(ConversationId, String, Vec<Choice>),
    Document(ConversationId, String, Vec<u8>),
}

/// Records every outbound message; can be told to fail one send
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<Sent>>,
    attempts: AtomicUsize,
    /// 1-based send attempt that fails
    fail_on: Option<usize>,
    notify: Notify,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_on(attempt: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_on: Some(attempt),
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self, conversation: ConversationId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(c, text) if c == conversation => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_text(&self, conversation: ConversationId) -> Option<String> {
        self.texts(conversation).pop()
    }

    /// Wait until at least `count` messages were recorded
    pub async fn wait_for(&self, count: usize) {
        while self.sent.lock().unwrap().len() < count {
            self.notify.notified().await;
        }
    }

    fn record(&self, message: Sent) -> Result<(), ReplyError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on == Some(attempt) {
            return Err(ReplyError::Delivery("simulated outage".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        self.notify.notify_one();
        Ok(())
    }
}

#[async_trait]
impl ReplyChannel for RecordingChannel {
    async fn send_text(&self, conversation: ConversationId, text: &str) -> Result<(), ReplyError> {
        self.record(Sent::Text(conversation, text.to_string()))
    }

    async fn send_choices(
        &self,
        conversation: ConversationId,
        prompt: &str,
        choices: Vec<Choice>,
    ) -> Result<(), ReplyError> {
        self.record(Sent::Choices(conversation, prompt.to_string(), choices))
    }

    async fn send_document(
        &self,
        conversation: ConversationId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ReplyError> {
        self.record(Sent::Document(conversation, file_name.to_string(), bytes))
    }
}
