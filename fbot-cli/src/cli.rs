//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use fbot_telegram::TelegramConfig;

#[derive(Parser)]
#[command(name = "fliegerbier")]
#[command(about = "Fliegerbier Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print pending authorization requests from DATABASE_URL.
    Pending,
}

/// Load TelegramConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<TelegramConfig> {
    TelegramConfig::load(token)
}
