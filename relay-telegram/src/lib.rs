//! # relay-telegram
//!
//! Telegram transport: adapters, [`relay_core::Bot`] implementation, connection config, REPL runner.
//! Handles only Telegram connectivity and handler-chain execution; no AI or conversation logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{reply_markup, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_repl;
