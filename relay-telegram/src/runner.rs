//! REPL: converts teloxide messages to core::Message and hands them to the HandlerChain.
//! Also registers the command menu and discovers the bot username before polling starts.

use anyhow::Result;
use handler_chain::HandlerChain;
use relay_core::{BotCommandInfo, ToCoreMessage};
use std::sync::Arc;
use teloxide::{prelude::*, types::BotCommand};
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Starts the REPL with the given teloxide Bot, HandlerChain and bot_username cache.
///
/// Before polling, `get_me()` fills `bot_username` and `commands` are registered as the
/// bot's command menu; failures of either are logged and do not prevent startup.
/// Updates of one chat are processed in order: the chain is awaited inside the update
/// handler, and teloxide runs different chats concurrently.
#[instrument(skip(bot, handler_chain, bot_username, commands))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
    commands: &[BotCommandInfo],
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before repl");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; addressed commands accepted for any bot"),
    }

    let menu: Vec<BotCommand> = commands
        .iter()
        .map(|c| BotCommand::new(c.command, c.description))
        .collect();
    if let Err(e) = bot.set_my_commands(menu).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();

            async move {
                let core_msg = TelegramMessageWrapper(&msg).to_core();

                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    message_type = %core_msg.message_type,
                    "Received message"
                );

                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, chat_id = core_msg.chat.id, "Handler chain failed");
                }

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}
