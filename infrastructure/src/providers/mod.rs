//! Provider adapters
//!
//! One [`LlmBackend`](boardroom_application::LlmBackend) per remote API.
//! OpenAI and xAI share the chat-completions wire format; Anthropic and
//! Gemini each have their own.

pub mod anthropic;
pub mod factory;
pub mod gemini;
mod http;
pub mod openai;
