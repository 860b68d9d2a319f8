//! Per-conversation session state
//!
//! One `Session` per active conversation, owned by the transport layer and
//! passed `&mut` into the pipeline. Holds the bounded turn history and the
//! blocked-query counter; nothing here is shared across sessions.

use medscreen_core::Turn;
use std::collections::VecDeque;
use uuid::Uuid;

/// Default cap on retained turns
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Conversation state for a single session
pub struct Session {
    id: Uuid,
    turns: VecDeque<Turn>,
    blocked_queries: u64,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            turns: VecDeque::new(),
            blocked_queries: 0,
        }
    }

    /// Session id for log correlation
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append a turn. Turns are immutable once appended.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
    }

    /// Drop oldest turns until at most `max` remain
    pub fn trim(&mut self, max: usize) {
        while self.turns.len() > max {
            self.turns.pop_front();
        }
    }

    /// Reset the turn history and the blocked counter together
    pub fn clear(&mut self) {
        self.turns.clear();
        self.blocked_queries = 0;
    }

    /// Record one blocked query
    pub fn record_blocked(&mut self) -> u64 {
        self.blocked_queries += 1;
        self.blocked_queries
    }

    /// Queries blocked since the last clear
    pub fn blocked_count(&self) -> u64 {
        self.blocked_queries
    }

    /// Retained turns, oldest first
    pub fn turns(&self) -> impl ExactSizeIterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of retained turns
    pub fn message_count(&self) -> usize {
        self.turns.len()
    }

    /// Render the model input: system instruction, blank line, then one
    /// capitalized `Role: content` line per retained turn in order.
    pub fn transcript(&self, system_instruction: &str) -> String {
        let mut prompt = String::with_capacity(
            system_instruction.len() + self.turns.iter().map(|t| t.content.len() + 16).sum::<usize>(),
        );
        prompt.push_str(system_instruction);
        prompt.push_str("\n\n");
        for turn in &self.turns {
            prompt.push_str(&turn.transcript_line());
            prompt.push('\n');
        }
        prompt
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
