//! Turn, role, mode and the per-conversation state value.

use serde::{Deserialize, Serialize};

/// Author of a turn, one-to-one with the chat completion `role` values the relay sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry of a conversation's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// How the next inbound message of a conversation is interpreted.
///
/// `Image` is a single pending image request: it reverts to `Text` as soon as one message
/// consumes it, whatever the outcome of the image call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Text,
    Image,
}

/// History and mode of a single conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    /// Oldest first. Alternation of roles is not enforced.
    pub history: Vec<Turn>,
    pub mode: Mode,
}

impl ConversationState {
    pub fn pending_image(&self) -> bool {
        self.mode == Mode::Image
    }

    /// Drops the oldest turns until at most `limit` remain. Returns how many were dropped.
    pub fn trim_to(&mut self, limit: usize) -> usize {
        let excess = self.history.len().saturating_sub(limit);
        if excess > 0 {
            self.history.drain(..excess);
        }
        excess
    }
}
