//! Authorization gates placed in front of handlers.
//!
//! Both gates end the conversation with [`HandlerResponse::Stop`] when access is denied; the inner
//! handler is not run. Refused updates are logged here, admitted ones by the inner action.

use std::sync::Arc;

use async_trait::async_trait;
use fbot_core::{
    AuthorizationStore, Bot, Handler, HandlerResponse, InlineButton, ReplyMarkup, Result,
    SendOptions, Update, User,
};
use tracing::{error, info, instrument, warn};

use crate::chat_data::ChatStore;
use crate::context::ActionContext;
use crate::event_log::log_incoming;

/// Reply to non-admins who call an admin-only function.
pub const ADMIN_ONLY_MESSAGE: &str = "Diese Funktion ist nur für Administratoren.";

/// Callback data prefix of the approve / deny buttons sent to the admin chat.
pub const AUTH_CALLBACK_PREFIX: &str = "auth:";

/// Runs the inner handler only when the update comes from the admin chat; everyone else gets
/// [`ADMIN_ONLY_MESSAGE`].
pub struct AdminOnly<H> {
    inner: H,
    admin_chat: i64,
    bot: Arc<dyn Bot>,
    chats: ChatStore,
}

impl<H: Handler> AdminOnly<H> {
    pub fn new(inner: H, admin_chat: i64, bot: Arc<dyn Bot>, chats: ChatStore) -> Self {
        Self {
            inner,
            admin_chat,
            bot,
            chats,
        }
    }
}

#[async_trait]
impl<H: Handler> Handler for AdminOnly<H> {
    #[instrument(skip(self, update), fields(update_id = update.id))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let ctx = ActionContext::from_update(self.bot.clone(), &self.chats, update.clone()).await?;
        if ctx.chat_id() == self.admin_chat {
            return self.inner.handle(update).await;
        }

        log_incoming(update);
        warn!(
            user_id = ctx.user().id,
            chat_id = ctx.chat_id(),
            "Administrative function called outside the admin chat"
        );
        ctx.respond().send(ADMIN_ONLY_MESSAGE).await?;
        Ok(HandlerResponse::Stop)
    }
}

/// Runs the inner handler for the admin chat and for authorized users. Unknown users get an
/// authorization request recorded and forwarded to the admin chat.
pub struct RequiresAuthorization<H> {
    inner: H,
    admin_chat: i64,
    store: Arc<dyn AuthorizationStore>,
    bot: Arc<dyn Bot>,
    chats: ChatStore,
}

impl<H: Handler> RequiresAuthorization<H> {
    pub fn new(
        inner: H,
        admin_chat: i64,
        store: Arc<dyn AuthorizationStore>,
        bot: Arc<dyn Bot>,
        chats: ChatStore,
    ) -> Self {
        Self {
            inner,
            admin_chat,
            store,
            bot,
            chats,
        }
    }

    async fn notify_admins(&self, user: &User, chat_id: i64) {
        let text = format!(
            "Neue Autorisierungsanfrage von {} ({}, id {})",
            user.display_name(),
            user.username
                .as_deref()
                .map(|u| format!("@{}", u))
                .unwrap_or_else(|| "ohne Benutzername".to_string()),
            user.id
        );
        let options = SendOptions {
            parse_mode: None,
            reply_markup: Some(authorization_keyboard(user.id)),
        };
        if let Err(e) = self.bot.send_message(self.admin_chat, &text, &options).await {
            error!(
                user_id = user.id,
                chat_id,
                error = %e,
                "Failed to notify admin chat about authorization request"
            );
        }
    }
}

/// Approve / deny buttons for a pending request of `user_id`.
pub fn authorization_keyboard(user_id: i64) -> ReplyMarkup {
    ReplyMarkup::InlineKeyboard(vec![vec![
        InlineButton::callback(
            "Freischalten",
            format!("{}approve:{}", AUTH_CALLBACK_PREFIX, user_id),
        ),
        InlineButton::callback(
            "Ablehnen",
            format!("{}deny:{}", AUTH_CALLBACK_PREFIX, user_id),
        ),
    ]])
}

#[async_trait]
impl<H: Handler> Handler for RequiresAuthorization<H> {
    #[instrument(skip(self, update), fields(update_id = update.id))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let ctx = ActionContext::from_update(self.bot.clone(), &self.chats, update.clone()).await?;

        if ctx.chat_id() == self.admin_chat {
            return self.inner.handle(update).await;
        }
        if self.store.is_authorized(ctx.user()).await? {
            return self.inner.handle(update).await;
        }

        log_incoming(update);
        info!(
            user_id = ctx.user().id,
            chat_id = ctx.chat_id(),
            "Unauthorized user, authorization requested"
        );
        if self
            .store
            .request_authorization(ctx.user(), ctx.chat_id())
            .await?
        {
            self.notify_admins(ctx.user(), ctx.chat_id()).await;
        }
        Ok(HandlerResponse::Stop)
    }
}
