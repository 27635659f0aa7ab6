//! Mode-switch commands: `/start`, `/ask_picture`, `/ask_question`.
//!
//! Commands only change the conversation mode and answer with a fixed text plus the command
//! keyboard; they never touch the history and never reach the AI services.

use async_trait::async_trait;
use conversation::ConversationStore;
use relay_core::{Bot, BotCommandInfo, Handler, HandlerResponse, Message, ReplyKeyboard, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

/// Greeting shown instead of the welcome text while the bot is in debug mode.
pub const MAINTENANCE_NOTICE: &str = "Maintenance in progress. The bot may answer slowly or not at all.";

pub const ASK_PICTURE_TEXT: &str =
    "Describe the picture you want. Your next message will be used as the image prompt.";

pub const ASK_QUESTION_TEXT: &str = "Ask me anything. I'm listening.";

/// Commands understood by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    AskPicture,
    AskQuestion,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::AskQuestion, Command::AskPicture, Command::Start];

    /// Name without the leading slash.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::AskPicture => "ask_picture",
            Command::AskQuestion => "ask_question",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "Start the bot",
            Command::AskPicture => "Generate a picture from your next message",
            Command::AskQuestion => "Chat with the assistant",
        }
    }

    /// Menu entries for every command.
    pub fn infos() -> Vec<BotCommandInfo> {
        Self::ALL
            .iter()
            .map(|c| BotCommandInfo {
                command: c.name(),
                description: c.description(),
            })
            .collect()
    }

    /// Parses the first word of `text` as a command.
    ///
    /// `/cmd@name` is accepted only when `name` matches `bot_username` (case-insensitive), or
    /// when the bot's own username is not known yet.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Command> {
        let word = text.split_whitespace().next()?;
        let word = word.strip_prefix('/')?;
        let (name, target) = match word.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (word, None),
        };
        if let (Some(target), Some(own)) = (target, bot_username) {
            if !target.eq_ignore_ascii_case(own) {
                return None;
            }
        }
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Reply keyboard offering the commands.
pub fn command_keyboard() -> ReplyKeyboard {
    ReplyKeyboard::new([vec!["/ask_question", "/ask_picture"], vec!["/start"]])
}

/// Answers the mode-switch commands and stops the chain; everything else passes through.
pub struct CommandHandler {
    store: Arc<ConversationStore>,
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
    debug: bool,
}

impl CommandHandler {
    pub fn new(
        store: Arc<ConversationStore>,
        bot: Arc<dyn Bot>,
        bot_username: Arc<RwLock<Option<String>>>,
        debug: bool,
    ) -> Self {
        Self {
            store,
            bot,
            bot_username,
            debug,
        }
    }

    fn reply_text(&self, command: Command, message: &Message) -> String {
        match command {
            Command::Start if self.debug => MAINTENANCE_NOTICE.to_string(),
            Command::Start => format!(
                "Thank you for turning me on, {}!",
                message.user.display_name()
            ),
            Command::AskPicture => ASK_PICTURE_TEXT.to_string(),
            Command::AskQuestion => ASK_QUESTION_TEXT.to_string(),
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let command = {
            let username = self.bot_username.read().await;
            Command::parse(&message.content, username.as_deref())
        };
        let Some(command) = command else {
            return Ok(HandlerResponse::Continue);
        };

        let chat_id = message.chat.id;
        self.store
            .set_pending_image(chat_id, command == Command::AskPicture);
        debug!(command = command.name(), "mode updated");

        let text = self.reply_text(command, message);
        let keyboard = command_keyboard();
        if let Err(e) = self
            .bot
            .send_message(&message.chat, &text, Some(&keyboard))
            .await
        {
            error!(error = %e, command = command.name(), "failed to deliver command reply");
            return Ok(HandlerResponse::Stop);
        }

        info!(command = command.name(), "command handled");
        Ok(HandlerResponse::Reply(text))
    }
}
