//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends via Telegram;
//! tests substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{Bot as CoreBot, Chat, RelayError, ReplyKeyboard, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, InputFile, KeyboardButton, KeyboardMarkup, ReplyMarkup},
};

/// File name attached to uploaded images.
const PHOTO_FILE_NAME: &str = "image.png";

/// Converts a core keyboard to Telegram markup; an empty keyboard removes the current one.
pub fn reply_markup(keyboard: &ReplyKeyboard) -> ReplyMarkup {
    if keyboard.is_empty() {
        return ReplyMarkup::kb_remove();
    }
    let rows = keyboard
        .rows
        .iter()
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())));
    ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
}

/// Thin wrapper around teloxide::Bot that implements relay-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: Option<&ReplyKeyboard>,
    ) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat.id), text.to_string());
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(reply_markup(keyboard));
        }
        request
            .await
            .map_err(|e| RelayError::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: &Chat,
        photo: Vec<u8>,
        keyboard: Option<&ReplyKeyboard>,
    ) -> Result<()> {
        let file = InputFile::memory(photo).file_name(PHOTO_FILE_NAME);
        let mut request = self.bot.send_photo(ChatId(chat.id), file);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(reply_markup(keyboard));
        }
        request
            .await
            .map_err(|e| RelayError::Delivery(e.to_string()))?;
        Ok(())
    }
}
