//! namebot CLI: run the Telegram bot or chat locally. Config from env and optional CLI args.

use anyhow::Result;
use bot_cli::{run_console, run_telegram, AppConfig, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    config.validate()?;

    match cli.command {
        Commands::Run { token } => run_telegram(config, token).await,
        Commands::Console { name, user_id } => run_console(config, name, user_id).await,
    }
}
