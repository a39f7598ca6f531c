//! Port definitions (interfaces for external systems)
//!
//! Ports define the interfaces that the application layer uses to
//! communicate with external systems. Adapters in the infrastructure
//! and presentation layers implement these ports.

pub mod llm_backend;
pub mod progress;
pub mod reply_channel;
