//! The conversation transcript.

use std::slice;

use little_chat_model::{Role, Turn};

/// An append-only, ordered record of the turns in a conversation.
///
/// Turns are never reordered, changed or removed. The transcript lives as
/// long as the widget that owns it.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the end.
    ///
    /// User turns with empty content are discarded.
    pub fn append(&mut self, turn: Turn) {
        if turn.role() == Role::User && turn.content().is_empty() {
            warn!("discarding an empty user turn");
            return;
        }
        self.turns.push(turn);
    }

    /// Returns every turn recorded so far, ready to be sent.
    #[inline]
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Returns the number of turns.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the latest turn.
    #[inline]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Iterates over the turns, oldest first.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = slice::Iter<'a, Turn>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
