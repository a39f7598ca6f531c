//! Persona domain.
//!
//! - [`id::PersonaId`]: the eight board members
//! - [`id::ProviderKind`]: the backend each persona is bound to
//! - [`catalog::Persona`]: immutable persona record (prompt, temperature, glyph)

pub mod catalog;
pub mod id;
