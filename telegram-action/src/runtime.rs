//! Shared wiring for building actions and gates over one transport, chat store and admin chat.

use std::sync::Arc;

use fbot_core::{AuthorizationStore, Bot, Handler};

use crate::action::{patch_telegram_action, Action, TelegramAction};
use crate::auth::{AdminOnly, RequiresAuthorization};
use crate::chat_data::ChatStore;

#[derive(Clone)]
pub struct Actions {
    bot: Arc<dyn Bot>,
    chats: ChatStore,
    admin_chat: i64,
    authorization: Arc<dyn AuthorizationStore>,
}

impl Actions {
    pub fn new(
        bot: Arc<dyn Bot>,
        admin_chat: i64,
        authorization: Arc<dyn AuthorizationStore>,
    ) -> Self {
        Self {
            bot,
            chats: ChatStore::new(),
            admin_chat,
            authorization,
        }
    }

    /// Uses an existing chat store instead of a fresh one.
    pub fn with_chat_store(mut self, chats: ChatStore) -> Self {
        self.chats = chats;
        self
    }

    pub fn bot(&self) -> &Arc<dyn Bot> {
        &self.bot
    }

    pub fn chats(&self) -> &ChatStore {
        &self.chats
    }

    pub fn admin_chat(&self) -> i64 {
        self.admin_chat
    }

    pub fn patch_telegram_action<A, Args>(&self, action: A) -> TelegramAction
    where
        A: Action<Args>,
        Args: 'static,
    {
        patch_telegram_action(self.bot.clone(), self.chats.clone(), action)
    }

    pub fn requires_authorization<H: Handler>(&self, inner: H) -> RequiresAuthorization<H> {
        RequiresAuthorization::new(
            inner,
            self.admin_chat,
            self.authorization.clone(),
            self.bot.clone(),
            self.chats.clone(),
        )
    }

    pub fn admin_only<H: Handler>(&self, inner: H) -> AdminOnly<H> {
        AdminOnly::new(inner, self.admin_chat, self.bot.clone(), self.chats.clone())
    }
}
