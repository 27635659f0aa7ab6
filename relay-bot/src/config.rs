//! Bot config: Telegram connection, OpenAI access, conversation and storage settings.
//! Loaded from env (after `.env` has been read by dotenvy).

use anyhow::Result;
use conversation::DEFAULT_HISTORY_LIMIT;
use image_generation_client::DEFAULT_IMAGE_MODEL;
use llm_client::DEFAULT_MODEL;
use openai_client::{mask_token, DEFAULT_BASE_URL};
use relay_telegram::TelegramConfig;
use std::env;
use tracing::error;

/// Default directory for generated images.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Default log file path.
pub const DEFAULT_LOG_FILE: &str = "logs/program.log";

/// Log file path: LOG_FILE or [`DEFAULT_LOG_FILE`]. Read before the rest of the config so that
/// config errors are already logged.
pub fn log_file_from_env() -> String {
    env::var("LOG_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    /// OPENAI_API_KEY
    pub openai_api_key: String,
    /// OPENAI_BASE_URL
    pub openai_base_url: String,
    /// AI_MODEL
    pub ai_model: String,
    /// IMAGE_MODEL
    pub image_model: String,
    /// LLM_SYSTEM_PROMPT or SYSTEM_PROMPT
    pub system_prompt: Option<String>,
    /// DEBUG: any non-empty value replaces the /start greeting with a maintenance notice
    pub debug: bool,
    /// IMAGE_DIR
    pub image_dir: String,
    /// LOG_FILE
    pub log_file: String,
    /// HISTORY_LIMIT: turns kept per conversation
    pub history_limit: usize,
}

impl BotConfig {
    /// Config with the given credentials and every other setting at its default.
    pub fn with_keys(bot_token: String, openai_api_key: String) -> Self {
        Self {
            telegram: TelegramConfig::with_token(bot_token),
            openai_api_key,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            ai_model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            system_prompt: None,
            debug: false,
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Load from environment variables. `token` overrides TOKEN / BOT_TOKEN if provided.
    /// Fails when the Telegram token or OPENAI_API_KEY is missing.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;

        let Some(openai_api_key) = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
        else {
            error!("OpenAI API key not found");
            anyhow::bail!("OPENAI_API_KEY not set");
        };

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let ai_model = env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let image_model =
            env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        let system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .or_else(|_| env::var("SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let debug = env::var("DEBUG").map(|v| !v.is_empty()).unwrap_or(false);
        let image_dir = env::var("IMAGE_DIR").unwrap_or_else(|_| DEFAULT_IMAGE_DIR.to_string());
        let history_limit = env::var("HISTORY_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Ok(Self {
            telegram,
            openai_api_key,
            openai_base_url,
            ai_model,
            image_model,
            system_prompt,
            debug,
            image_dir,
            log_file: log_file_from_env(),
            history_limit,
        })
    }

    /// Validate config: URLs must parse, history limit must be positive.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if reqwest::Url::parse(&self.openai_base_url).is_err() {
            anyhow::bail!("OPENAI_BASE_URL is not a valid URL: {}", self.openai_base_url);
        }
        if self.history_limit == 0 {
            anyhow::bail!("HISTORY_LIMIT must be at least 1");
        }
        Ok(())
    }

    /// API key for logs.
    pub fn masked_api_key(&self) -> String {
        mask_token(&self.openai_api_key)
    }
}
