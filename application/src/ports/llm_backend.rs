//! LLM backend port
//!
//! Defines the interface for one generation provider. The persona catalog
//! binds every persona to exactly one [`ProviderKind`]; the dispatcher looks
//! the backend up by that kind.

use async_trait::async_trait;
use boardroom_domain::{GenerationRequest, ProviderKind};
use thiserror::Error;

/// Errors that can occur while asking a provider for a reply
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend not configured: {0}")]
    NotConfigured(ProviderKind),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One generation provider
///
/// Implementations (adapters) live in the infrastructure layer. A backend
/// turns a [`GenerationRequest`] into its own wire shape and returns the raw
/// reply text; normalization is the dispatcher's job.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Which provider this backend talks to
    fn kind(&self) -> ProviderKind;

    /// Produce one reply
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;
}
