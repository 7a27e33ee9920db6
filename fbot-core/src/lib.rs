//! # fbot-core
//!
//! Core types and traits for the bot: [`Bot`], [`Handler`], [`AuthorizationStore`], update, message
//! and user types, outgoing message options, and tracing initialization. Transport-agnostic; used
//! by fbot-telegram, handler-chain and telegram-action.

pub mod auth;
pub mod bot;
pub mod error;
pub mod logger;
pub mod outgoing;
pub mod types;

pub use auth::AuthorizationStore;
pub use bot::Bot;
pub use error::{FbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use outgoing::{
    CallbackAnswer, InlineButton, MediaSource, ParseMode, ReplyMarkup, SendOptions, SentMessage,
};
pub use types::{
    CallbackQuery, Chat, Handler, HandlerResponse, Message, MessageRef, ToCoreMessage,
    ToCoreUpdate, ToCoreUser, Update, UpdateKind, User, Voice,
};
