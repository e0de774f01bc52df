use llm_client::Turn;
use std::collections::VecDeque;

/// Bounded, ordered conversation history. Pushing past the bound evicts the oldest turns first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationWindow {
    turns: VecDeque<Turn>,
    max_len: usize,
}

impl ConversationWindow {
    /// Creates an empty window holding at most `max_len` turns (minimum 1).
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        Self {
            turns: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends a turn, then evicts from the front until within bound. Returns the number evicted.
    pub fn push(&mut self, turn: Turn) -> usize {
        self.turns.push_back(turn);
        let mut evicted = 0;
        while self.turns.len() > self.max_len {
            self.turns.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn to_vec(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    /// The history as it would be after pushing `pending`, without mutating the window.
    /// This is what gets sent to the provider; the window only changes once a reply arrives.
    pub fn with_pending(&self, pending: Turn) -> Vec<Turn> {
        let keep = self.max_len - 1;
        let skip = self.turns.len().saturating_sub(keep);
        self.turns
            .iter()
            .skip(skip)
            .cloned()
            .chain(std::iter::once(pending))
            .collect()
    }
}
