//! Concurrency-safe map from conversation id to [`ConversationState`].

use crate::state::{ConversationState, Mode, Turn};
use dashmap::DashMap;
use tracing::debug;

/// Conversation identifier: the chat id of the messaging platform.
pub type ConversationId = i64;

/// Maximum number of turns kept per conversation (two full exchanges).
pub const DEFAULT_HISTORY_LIMIT: usize = 4;

/// In-memory conversation state store. Created at process start and owned by the dispatcher.
#[derive(Debug)]
pub struct ConversationStore {
    conversations: DashMap<ConversationId, ConversationState>,
    history_limit: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Store keeping at most `limit` turns per conversation (at least one).
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            conversations: DashMap::new(),
            history_limit: limit.max(1),
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Returns a snapshot of the conversation, creating empty text-mode state when absent.
    pub fn get_or_create(&self, id: ConversationId) -> ConversationState {
        self.conversations.entry(id).or_default().value().clone()
    }

    /// Snapshot without creating.
    pub fn get(&self, id: ConversationId) -> Option<ConversationState> {
        self.conversations.get(&id).map(|s| s.value().clone())
    }

    pub fn set_mode(&self, id: ConversationId, mode: Mode) {
        self.conversations.entry(id).or_default().mode = mode;
        debug!(conversation_id = id, mode = ?mode, "conversation mode set");
    }

    /// `true` arms a single image request for the next message; `false` returns to text mode.
    pub fn set_pending_image(&self, id: ConversationId, pending: bool) {
        let mode = if pending { Mode::Image } else { Mode::Text };
        self.set_mode(id, mode);
    }

    /// Current mode; `Text` for unknown conversations.
    pub fn mode(&self, id: ConversationId) -> Mode {
        self.conversations
            .get(&id)
            .map(|s| s.mode)
            .unwrap_or_default()
    }

    pub fn pending_image(&self, id: ConversationId) -> bool {
        self.mode(id) == Mode::Image
    }

    /// Consumes the one-shot image request: returns whether one was pending and leaves the
    /// conversation in text mode either way.
    pub fn take_image_request(&self, id: ConversationId) -> bool {
        let mut state = self.conversations.entry(id).or_default();
        let pending = state.mode == Mode::Image;
        state.mode = Mode::Text;
        pending
    }

    /// Appends a turn and returns the new history length.
    pub fn push_turn(&self, id: ConversationId, turn: Turn) -> usize {
        let mut state = self.conversations.entry(id).or_default();
        state.history.push(turn);
        state.history.len()
    }

    /// Removes and returns the most recent turn.
    pub fn pop_last_turn(&self, id: ConversationId) -> Option<Turn> {
        self.conversations
            .get_mut(&id)
            .and_then(|mut s| s.history.pop())
    }

    /// Ordered copy of the conversation history (empty for unknown ids).
    pub fn history(&self, id: ConversationId) -> Vec<Turn> {
        self.conversations
            .get(&id)
            .map(|s| s.history.clone())
            .unwrap_or_default()
    }

    /// Enforces the history cap, dropping oldest turns first. Returns how many were dropped.
    pub fn trim(&self, id: ConversationId) -> usize {
        let dropped = self
            .conversations
            .get_mut(&id)
            .map(|mut s| s.trim_to(self.history_limit))
            .unwrap_or(0);
        if dropped > 0 {
            debug!(conversation_id = id, dropped, "history trimmed");
        }
        dropped
    }

    /// Number of conversations seen so far.
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
