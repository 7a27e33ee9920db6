//! Typed parameters an action can declare.
//!
//! An action receives exactly the parameters in its signature. Each parameter type knows how to
//! pull itself out of the [`ActionContext`]; types tied to one update kind (e.g. [`MessageId`] for
//! messages, [`CallbackData`] for callbacks) fail with [`HandlerError::MissingParameter`] on the
//! other kind. Wrap a parameter in `Option` to accept both.

use std::sync::Arc;

use fbot_core::{Bot, HandlerError, Update, User};

use crate::chat_data::{ChatDict, DeleteMe};
use crate::context::ActionContext;
use crate::helpers::{CommitCallback, Delete, Edit, Respond};

pub trait FromActionContext: Sized {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError>;
}

impl<T: FromActionContext> FromActionContext for Option<T> {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(T::from_context(ctx).ok())
    }
}

/// The transport, for calls the helpers don't cover.
#[derive(Clone)]
pub struct BotHandle(pub Arc<dyn Bot>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(pub Option<String>);

/// The user's first name; empty if Telegram sent none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstName(pub Option<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastName(pub Option<String>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatId(pub i64);

/// Id of the incoming message. Messages only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageId(pub i32);

/// Text of the incoming message; None for media without text. Messages only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub Option<String>);

/// Id of the message whose inline keyboard was pressed. Callbacks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalMessageId(pub i32);

/// Payload of the pressed button. Callbacks only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackData(pub Option<String>);

impl FromActionContext for Update {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ctx.update().clone())
    }
}

impl FromActionContext for BotHandle {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(BotHandle(ctx.bot().clone()))
    }
}

impl FromActionContext for User {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ctx.user().clone())
    }
}

impl FromActionContext for Username {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(Username(ctx.user().username.clone()))
    }
}

impl FromActionContext for Name {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(Name(ctx.user().first_name.clone().unwrap_or_default()))
    }
}

impl FromActionContext for FirstName {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(FirstName(ctx.user().first_name.clone()))
    }
}

impl FromActionContext for LastName {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(LastName(ctx.user().last_name.clone()))
    }
}

impl FromActionContext for ChatDict {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ctx.chat_data().chat_dict())
    }
}

impl FromActionContext for DeleteMe {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ctx.chat_data().delete_me())
    }
}

impl FromActionContext for ChatId {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ChatId(ctx.chat_id()))
    }
}

impl FromActionContext for MessageId {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        ctx.update()
            .message()
            .map(|m| MessageId(m.id))
            .ok_or(HandlerError::MissingParameter("message_id"))
    }
}

impl FromActionContext for Text {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        ctx.update()
            .message()
            .map(|m| Text(m.text.clone()))
            .ok_or(HandlerError::MissingParameter("text"))
    }
}

impl FromActionContext for OriginalMessageId {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        ctx.update()
            .callback_query()
            .and_then(|q| q.message.as_ref())
            .map(|m| OriginalMessageId(m.id))
            .ok_or(HandlerError::MissingParameter("original_message_id"))
    }
}

impl FromActionContext for CallbackData {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        ctx.update()
            .callback_query()
            .map(|q| CallbackData(q.data.clone()))
            .ok_or(HandlerError::MissingParameter("callback_data"))
    }
}

impl FromActionContext for CommitCallback {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        ctx.commit_callback()
            .ok_or(HandlerError::MissingParameter("commit_callback"))
    }
}

impl FromActionContext for Respond {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ctx.respond())
    }
}

impl FromActionContext for Edit {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ctx.edit())
    }
}

impl FromActionContext for Delete {
    fn from_context(ctx: &ActionContext) -> Result<Self, HandlerError> {
        Ok(ctx.delete())
    }
}
