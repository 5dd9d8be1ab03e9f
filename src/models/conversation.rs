#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::{
    config::{Configuration, constants::HELLO_MESSAGE},
    models::Turn,
};

/// The ordered, append-only list of turns for the current session.
/// Discarded when the process exits.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// A fresh conversation opened by the tutor's greeting.
    pub fn new_hello() -> Self {
        let mut conversation = Self::default();
        conversation.turns.push(Turn::new_model(
            Configuration::instance()
                .general
                .hello_message
                .as_deref()
                .unwrap_or(HELLO_MESSAGE),
        ));
        conversation
    }

    pub fn with_turns(mut self, turns: Vec<Turn>) -> Self {
        self.turns = turns;
        self
    }

    pub fn append_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn last_turn_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
