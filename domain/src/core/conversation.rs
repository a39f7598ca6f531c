//! Conversation identity

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a chat (Value Object)
///
/// Every piece of per-conversation state is keyed by this id; nothing is
/// shared between two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(i64);

impl ConversationId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ConversationId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ConversationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidConversationId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ConversationId = "189234871".parse().unwrap();
        assert_eq!(id, ConversationId::new(189234871));
        assert_eq!(id.to_string(), "189234871");
    }

    #[test]
    fn test_negative_group_ids_are_valid() {
        let id: ConversationId = "-1001".parse().unwrap();
        assert_eq!(id.as_i64(), -1001);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("chat".parse::<ConversationId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&ConversationId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
