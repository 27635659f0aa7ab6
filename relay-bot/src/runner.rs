use anyhow::{Context, Result};
use conversation::ConversationStore;
use handler_chain::HandlerChain;
use image_generation_client::ImageGenerationClient;
use llm_client::{ImageGenerator, LlmClient, OpenAIImageGenerator, OpenAILlmClient};
use relay_core::Bot;
use relay_handlers::{Command, CommandHandler, LoggingHandler, RelayHandler, TurnDispatcher};
use relay_telegram::{run_repl, TelegramBotAdapter};
use std::sync::Arc;
use storage::{FileImageStore, ImageStore};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::BotConfig;

/// Builds the AI clients, the store and the chain: LoggingHandler → CommandHandler →
/// RelayHandler. `bot` is the outbound side; tests pass a recording mock.
pub fn build_handler_chain(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<HandlerChain> {
    let llm: Arc<dyn LlmClient> = Arc::new(
        OpenAILlmClient::with_base_url(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        )
        .with_model(config.ai_model.clone())
        .with_system_prompt_opt(config.system_prompt.clone()),
    );

    let image_client = ImageGenerationClient::with_base_url(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
    )
    .context("Failed to build image generation client")?
    .with_model(config.image_model.clone());
    let images: Arc<dyn ImageGenerator> = Arc::new(OpenAIImageGenerator::new(image_client));

    let image_store: Arc<dyn ImageStore> = Arc::new(FileImageStore::new(&config.image_dir));
    let store = Arc::new(ConversationStore::with_history_limit(config.history_limit));
    let dispatcher = Arc::new(TurnDispatcher::new(
        store.clone(),
        llm,
        images,
        image_store,
    ));

    Ok(HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(CommandHandler::new(
            store,
            bot.clone(),
            bot_username,
            config.debug,
        )))
        .add_handler(Arc::new(RelayHandler::new(dispatcher, bot))))
}

/// Main entry: validate config, connect to Telegram, build the chain, then run the REPL.
/// Tracing must already be initialized.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    info!(
        openai_base_url = %config.openai_base_url,
        ai_model = %config.ai_model,
        image_model = %config.image_model,
        image_dir = %config.image_dir,
        history_limit = config.history_limit,
        debug = config.debug,
        api_key = %config.masked_api_key(),
        "Initializing bot"
    );

    let teloxide_bot = config.telegram.build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let bot_username = Arc::new(RwLock::new(None));
    let handler_chain = build_handler_chain(&config, bot, bot_username.clone())?;

    info!("Bot started successfully");

    run_repl(teloxide_bot, handler_chain, bot_username, &Command::infos()).await
}
