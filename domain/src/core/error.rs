//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// All variants describe malformed user input; none of them is fatal to a
/// conversation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    #[error("History depth must be between {min} and {max}, got {value}")]
    InvalidDepth { value: i64, min: usize, max: usize },

    #[error("Not a number: {0}")]
    NotANumber(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid conversation id: {0}")]
    InvalidConversationId(String),

    #[error("Empty persona list")]
    EmptyRoster,
}

impl DomainError {
    /// Check if this error was caused by an unrecognized persona token
    pub fn is_unknown_persona(&self) -> bool {
        matches!(self, DomainError::UnknownPersona(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_depth_display() {
        let error = DomainError::InvalidDepth {
            value: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(
            error.to_string(),
            "History depth must be between 1 and 10, got 11"
        );
    }

    #[test]
    fn test_is_unknown_persona_check() {
        assert!(DomainError::UnknownPersona("CXO".to_string()).is_unknown_persona());
        assert!(!DomainError::EmptyRoster.is_unknown_persona());
        assert!(!DomainError::InvalidDate("x".to_string()).is_unknown_persona());
    }
}
