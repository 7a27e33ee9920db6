//! Normalizes an incoming update into the parameter bag actions draw from.

use std::sync::Arc;

use fbot_core::{Bot, HandlerError, Update, UpdateKind, User};

use crate::chat_data::{ChatDataHandle, ChatStore};
use crate::helpers::{CommitCallback, Delete, Edit, Respond};

/// Everything an action may ask for, resolved once per update.
#[derive(Clone)]
pub struct ActionContext {
    update: Update,
    bot: Arc<dyn Bot>,
    user: User,
    chat_id: i64,
    chat_data: ChatDataHandle,
}

impl ActionContext {
    /// Builds the context for a message or callback update.
    ///
    /// The chat id is the message's chat for messages and the effective chat for callbacks.
    /// Fails for updates without a user or chat, and for other update kinds.
    pub async fn from_update(
        bot: Arc<dyn Bot>,
        chats: &ChatStore,
        update: Update,
    ) -> Result<Self, HandlerError> {
        let chat_id = match &update.kind {
            UpdateKind::Message(message) => message.chat.id,
            UpdateKind::CallbackQuery(_) => update
                .effective_chat()
                .map(|c| c.id)
                .ok_or(HandlerError::NoEffectiveChat)?,
            UpdateKind::Other(kind) => return Err(HandlerError::UnsupportedUpdate(kind.clone())),
        };
        let user = update
            .effective_user()
            .cloned()
            .ok_or(HandlerError::NoEffectiveUser)?;
        let chat_data = chats.chat(chat_id).await;

        Ok(Self {
            update,
            bot,
            user,
            chat_id,
            chat_data,
        })
    }

    pub fn update(&self) -> &Update {
        &self.update
    }

    pub fn bot(&self) -> &Arc<dyn Bot> {
        &self.bot
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub fn chat_data(&self) -> &ChatDataHandle {
        &self.chat_data
    }

    pub fn respond(&self) -> Respond {
        Respond::new(
            self.bot.clone(),
            self.chat_id,
            self.user.clone(),
            self.chat_data.delete_me(),
        )
    }

    pub fn edit(&self) -> Edit {
        Edit::new(self.bot.clone(), self.chat_id)
    }

    pub fn delete(&self) -> Delete {
        Delete::new(self.bot.clone(), self.chat_id)
    }

    /// Callback answerer; None unless the update is a callback query.
    pub fn commit_callback(&self) -> Option<CommitCallback> {
        self.update
            .callback_query()
            .map(|q| CommitCallback::new(self.bot.clone(), q.id.clone()))
    }
}
