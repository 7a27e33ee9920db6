//! fliegerbier CLI: run the Telegram bot, or list pending authorization requests. Config from env and optional CLI args.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fbot_cli::{build_chain, load_config, Cli, Commands};
use fbot_telegram::{build_bot, run_dispatcher, TelegramBotAdapter};
use storage::AuthorizationRepository;
use telegram_action::Actions;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run(token).await,
        Commands::Pending => handle_pending().await,
    }
}

async fn run(token: Option<String>) -> Result<()> {
    let config = load_config(token)?;
    fbot_core::init_tracing(&config.log_file)?;
    info!(admin_chat = config.admin_chat, database_url = %config.database_url, "Starting fliegerbier");

    let repo = AuthorizationRepository::new(&config.database_url)
        .await
        .with_context(|| format!("Open authorization store at {}", config.database_url))?;

    let bot = build_bot(&config)?;
    let actions = Actions::new(
        Arc::new(TelegramBotAdapter::new(bot.clone())),
        config.admin_chat,
        Arc::new(repo.clone()),
    );
    let chain = build_chain(&actions, repo);
    info!(handlers = chain.len(), "Handler chain ready");

    run_dispatcher(bot, chain).await
}

/// Handle the pending command: reads DATABASE_URL (no token needed) and prints open requests.
async fn handle_pending() -> Result<()> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| fbot_telegram::DEFAULT_DATABASE_URL.to_string());
    let repo = AuthorizationRepository::new(&database_url)
        .await
        .with_context(|| format!("Open authorization store at {}", database_url))?;

    let records = repo.list_pending().await?;
    if records.is_empty() {
        println!("No pending requests (database: {}).", database_url);
        return Ok(());
    }

    println!(
        "{:<14} {:<14} {:<20} {:<24} {}",
        "user_id", "chat_id", "username", "name", "requested_at"
    );
    println!("{}", "-".repeat(96));
    for r in &records {
        let user = r.user();
        println!(
            "{:<14} {:<14} {:<20} {:<24} {}",
            r.user_id,
            r.chat_id,
            user.username.as_deref().unwrap_or("-"),
            user.display_name(),
            r.requested_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}
