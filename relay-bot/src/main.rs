use anyhow::Result;
use clap::Parser;
use relay_bot::{log_file_from_env, run_bot, BotConfig, Cli, Commands};
use relay_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            init_tracing(&log_file_from_env())?;
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
    }
}
