//! # telegram-action
//!
//! Action layer between the transport and the bot's features. Incoming updates are logged and
//! normalized into an [`ActionContext`]; plain async functions declare the parameters they need
//! ([`ChatId`], [`Text`], [`Respond`], [`CommitCallback`], ...) and get exactly those injected.
//! [`Actions::requires_authorization`] and [`Actions::admin_only`] gate handlers by the admin chat
//! and an [`fbot_core::AuthorizationStore`].

pub mod action;
pub mod auth;
pub mod chat_data;
pub mod context;
pub mod event_log;
pub mod extract;
pub mod helpers;
pub mod markdown;
pub mod runtime;

#[cfg(test)]
mod test;

pub use action::{patch_telegram_action, Action, BoxedAction, TelegramAction};
pub use auth::{
    authorization_keyboard, AdminOnly, RequiresAuthorization, ADMIN_ONLY_MESSAGE,
    AUTH_CALLBACK_PREFIX,
};
pub use chat_data::{ChatDataHandle, ChatDict, ChatStore, DeleteMe};
pub use context::ActionContext;
pub use extract::{
    BotHandle, CallbackData, ChatId, FirstName, FromActionContext, LastName, MessageId, Name,
    OriginalMessageId, Text, Username,
};
pub use helpers::{
    CommitCallback, Delete, Edit, EditOptions, Respond, RespondOptions, CAPTION_LIMIT,
};
pub use markdown::custom_markdown_escape;
pub use runtime::Actions;
