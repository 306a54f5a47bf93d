use crate::constants::defaults;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Transcript behind the chat panel. The oldest turns are dropped once the
/// cap is exceeded.
pub struct ChatThread {
    turns: VecDeque<ChatTurn>,
    max_turns: usize,
}

impl ChatThread {
    pub fn new() -> Self {
        Self {
            turns: VecDeque::new(),
            max_turns: defaults::MAX_CHAT_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push_back(ChatTurn::user(text));
        self.trim_if_needed();
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push_back(ChatTurn::assistant(text));
        self.trim_if_needed();
    }

    pub fn turns(&self) -> Vec<ChatTurn> {
        self.turns.iter().cloned().collect()
    }

    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.turns.back()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    fn trim_if_needed(&mut self) {
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }
}

impl Default for ChatThread {
    fn default() -> Self {
        Self::new()
    }
}
