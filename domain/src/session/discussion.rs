//! Round-robin discussion data

use crate::core::error::DomainError;
use crate::persona::id::PersonaId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of recent turns quoted in continuation prompts
pub const DEFAULT_CONTEXT_WINDOW: usize = 3;

/// Scheduler state of a live discussion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscussionState {
    /// Personas are taking turns
    Running,
    /// A cycle finished; waiting for the user to continue or end
    AwaitingContinuation,
}

/// Ordered participants of a discussion
///
/// `restricted` is set for a hand-picked team; prompts then name exactly who
/// takes part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    members: Vec<PersonaId>,
    restricted: bool,
}

impl Roster {
    /// The whole board in catalog order
    pub fn full_board() -> Self {
        Self {
            members: PersonaId::ALL.to_vec(),
            restricted: false,
        }
    }

    /// A hand-picked team, turn order as given
    pub fn team(members: Vec<PersonaId>) -> Result<Self, DomainError> {
        if members.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        Ok(Self {
            members,
            restricted: true,
        })
    }

    pub fn members(&self) -> &[PersonaId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members to name in the system prompt, if the roster is restricted
    pub fn restriction(&self) -> Option<&[PersonaId]> {
        self.restricted.then_some(self.members.as_slice())
    }
}

/// One persona's contribution to the discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionTurn {
    pub persona: PersonaId,
    pub response: String,
}

impl DiscussionTurn {
    pub fn new(persona: PersonaId, response: impl Into<String>) -> Self {
        Self {
            persona,
            response: response.into(),
        }
    }
}

/// Rolling window of the most recent turns of one discussion
///
/// Scoped to the discussion, separate from per-persona history.
#[derive(Debug, Clone)]
pub struct DiscussionContext {
    turns: VecDeque<DiscussionTurn>,
    capacity: usize,
}

impl DiscussionContext {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, turn: DiscussionTurn) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Turns in chronological order
    pub fn recent(&self) -> impl Iterator<Item = &DiscussionTurn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&DiscussionTurn> {
        self.turns.back()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for DiscussionContext {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WINDOW)
    }
}
