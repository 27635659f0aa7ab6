//! # relay-bot
//!
//! Wires the relay together: configuration from env, OpenAI clients, conversation store,
//! handler chain and the Telegram REPL.

pub mod cli;
mod config;
mod runner;

pub use cli::{Cli, Commands};
pub use config::{log_file_from_env, BotConfig, DEFAULT_IMAGE_DIR, DEFAULT_LOG_FILE};
pub use runner::{build_handler_chain, run_bot};
