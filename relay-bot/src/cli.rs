//! Command line: `relay-bot run [--token TOKEN]`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "relay-bot")]
#[command(about = "Telegram bot relaying chats to OpenAI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override TOKEN / BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}
