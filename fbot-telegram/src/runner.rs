//! Long polling: every message and callback query is converted to a core [`fbot_core::Update`]
//! and handed to the [`HandlerChain`]. Chain errors are logged; the loop keeps running.

use std::sync::Arc;

use anyhow::{Context, Result};
use fbot_core::ToCoreUpdate;
use handler_chain::HandlerChain;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::adapters::TelegramUpdateWrapper;
use crate::config::TelegramConfig;

/// Builds the teloxide Bot, pointing it at a custom Bot API server when configured.
pub fn build_bot(config: &TelegramConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(&config.bot_token);
    match &config.telegram_api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("invalid Telegram API url: {}", url))?;
            info!(api_url = %url, "Using custom Telegram API url");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

async fn dispatch(chain: &HandlerChain, update: &Update) {
    let core_update = TelegramUpdateWrapper(update).to_core();
    info!(
        update_id = core_update.id,
        kind = core_update.kind_name(),
        "step: processing update (handler chain started)"
    );
    if let Err(e) = chain.handle(&core_update).await {
        error!(
            error = %e,
            update_id = core_update.id,
            user_id = ?core_update.effective_user().map(|u| u.id),
            "Handler chain failed"
        );
    }
}

fn schema(chain: Arc<HandlerChain>) -> UpdateHandler<teloxide::RequestError> {
    let for_messages = chain.clone();
    let for_callbacks = chain;

    dptree::entry()
        .branch(Update::filter_message().endpoint(move |update: Update| {
            let chain = for_messages.clone();
            async move {
                dispatch(&chain, &update).await;
                respond(())
            }
        }))
        .branch(
            Update::filter_callback_query().endpoint(move |update: Update| {
                let chain = for_callbacks.clone();
                async move {
                    dispatch(&chain, &update).await;
                    respond(())
                }
            }),
        )
}

/// Runs the dispatcher until Ctrl+C. Updates of one chat are processed in order.
#[instrument(skip(bot, chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    Dispatcher::builder(bot, schema(Arc::new(chain)))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
