//! Conversation value - the ordered history kept for one user.

use serde::Serialize;

use super::message::Turn;

/// Ordered list of turns for one identifier.
///
/// Insertion order is dialogue order and is what the provider sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends a turn to the end of the history.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Drops every turn at index `len` and beyond.
    pub fn truncate(&mut self, len: usize) {
        self.turns.truncate(len);
    }

    /// Drops the oldest turns until at most `max_turns` remain.
    ///
    /// Turns are dropped two at a time so user/assistant pairs stay together.
    /// A `max_turns` of zero means unbounded. Returns the number dropped.
    pub fn enforce_limit(&mut self, max_turns: usize) -> usize {
        if max_turns == 0 || self.turns.len() <= max_turns {
            return 0;
        }
        let excess = self.turns.len() - max_turns;
        let drop = (excess + excess % 2).min(self.turns.len());
        self.turns.drain(..drop);
        drop
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}
