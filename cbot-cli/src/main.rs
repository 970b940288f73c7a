//! cbot CLI: run the chat bot. Token and options come from a JSON config file;
//! commands are compiled from declarative specs at startup.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cbot_telegram::{BotConfig, Client, TelegramChat};
use tracing::info;

mod commands;

#[derive(Parser)]
#[command(name = "cbot")]
#[command(about = "Chat bot with declarative commands", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (token and options from the JSON config file).
    Run {
        #[arg(short, long, default_value = "config.json")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => run(&config).await,
    }
}

async fn run(config_path: &str) -> Result<()> {
    let config = BotConfig::load(config_path)?;
    cbot_core::init_tracing(config.log_file.as_deref()).context("initializing tracing")?;

    let chat = TelegramChat::new(config.token.clone());
    let mut client = Client::new(chat, config.command_prefix.clone());
    commands::register_commands(&mut client)?;

    info!(commands = client.commands().count(), "starting bot");
    client.run().await?;
    Ok(())
}
