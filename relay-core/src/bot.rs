//! Bot abstraction for sending replies back to a conversation.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it via teloxide and tests
//! substitute recording mocks.

use crate::error::Result;
use crate::types::Chat;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reply keyboard shown under the input field: rows of button labels (usually commands).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
}

impl ReplyKeyboard {
    /// Builds a keyboard from rows of labels.
    pub fn new<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.is_empty())
    }
}

/// A command advertised to the messaging platform's command menu (name without the slash).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotCommandInfo {
    pub command: &'static str,
    pub description: &'static str,
}

/// Outbound side of the messaging platform. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat, optionally replacing the reply keyboard.
    async fn send_message(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: Option<&ReplyKeyboard>,
    ) -> Result<()>;

    /// Sends a photo (raw image bytes) to the given chat.
    async fn send_photo(
        &self,
        chat: &Chat,
        photo: Vec<u8>,
        keyboard: Option<&ReplyKeyboard>,
    ) -> Result<()>;
}
