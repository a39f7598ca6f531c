//! Prompt text and generation request shapes.
//!
//! - [`request::GenerationRequest`]: provider-agnostic generation input
//! - [`template::PromptTemplate`]: localized discussion prompt text

pub mod request;
pub mod template;
