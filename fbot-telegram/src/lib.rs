//! # fbot-telegram
//!
//! Telegram transport layer: adapters from teloxide types, [`fbot_core::Bot`] implementation,
//! config, and the long-polling dispatcher that feeds a [`handler_chain::HandlerChain`].
//! No persistence or feature logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{
    TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUpdateWrapper, TelegramUserWrapper,
};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
pub use runner::{build_bot, run_dispatcher};
