//! Convenience functions injected into actions: respond, edit, delete, commit_callback.
//!
//! Each helper is bound to the chat of the current update. Deletes and edits are best effort:
//! transport errors are logged and dropped. Sends and callback answers propagate errors.

use std::sync::Arc;

use fbot_core::{
    Bot, CallbackAnswer, MediaSource, ParseMode, ReplyMarkup, Result, SendOptions, SentMessage,
    User,
};
use tracing::{debug, instrument};

use crate::chat_data::DeleteMe;
use crate::event_log::log_response;
use crate::markdown::custom_markdown_escape;

/// Telegram's caption limit for photos and documents, in characters.
pub const CAPTION_LIMIT: usize = 1024;

fn caption(text: &str) -> String {
    text.chars().take(CAPTION_LIMIT).collect()
}

fn escaped(text: &str, escape_markdown: Option<&str>) -> String {
    match escape_markdown {
        Some(escapes) if !escapes.is_empty() => custom_markdown_escape(text, escapes),
        _ => text.to_string(),
    }
}

/// Options for [`Respond::send_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondOptions {
    /// Delete the chat's transient messages after sending. Default true.
    pub do_delete: bool,
    /// Send a photo with the text as caption instead of a text message.
    pub photo: Option<MediaSource>,
    /// Send a document with the text as caption. Ignored when `photo` is set.
    pub file: Option<MediaSource>,
    /// Characters to backslash-escape in the text (text messages only).
    pub escape_markdown: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<ReplyMarkup>,
}

impl Default for RespondOptions {
    fn default() -> Self {
        Self {
            do_delete: true,
            photo: None,
            file: None,
            escape_markdown: None,
            parse_mode: None,
            reply_markup: None,
        }
    }
}

impl RespondOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave the transient messages in place.
    pub fn keep_transient(mut self) -> Self {
        self.do_delete = false;
        self
    }

    pub fn photo(mut self, photo: MediaSource) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn file(mut self, file: MediaSource) -> Self {
        self.file = Some(file);
        self
    }

    pub fn escape_markdown(mut self, escapes: impl Into<String>) -> Self {
        self.escape_markdown = Some(escapes.into());
        self
    }

    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    pub fn reply_markup(mut self, reply_markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(reply_markup);
        self
    }
}

/// Sends to the current chat, then clears the chat's transient messages.
#[derive(Clone)]
pub struct Respond {
    bot: Arc<dyn Bot>,
    chat_id: i64,
    user: User,
    delete_me: DeleteMe,
}

impl Respond {
    pub fn new(bot: Arc<dyn Bot>, chat_id: i64, user: User, delete_me: DeleteMe) -> Self {
        Self {
            bot,
            chat_id,
            user,
            delete_me,
        }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Sends a plain text message with default options.
    pub async fn send(&self, text: &str) -> Result<SentMessage> {
        self.send_with(text, RespondOptions::default()).await
    }

    #[instrument(skip(self, text, options), fields(chat_id = self.chat_id))]
    pub async fn send_with(&self, text: &str, options: RespondOptions) -> Result<SentMessage> {
        let sent = if let Some(photo) = &options.photo {
            self.bot
                .send_photo(self.chat_id, photo, &caption(text))
                .await?
        } else if let Some(file) = &options.file {
            self.bot
                .send_document(self.chat_id, file, &caption(text))
                .await?
        } else {
            let text = escaped(text, options.escape_markdown.as_deref());
            let send_options = SendOptions {
                parse_mode: options.parse_mode,
                reply_markup: options.reply_markup.clone(),
            };
            let sent = self
                .bot
                .send_message(self.chat_id, &text, &send_options)
                .await?;
            log_response(&sent, &self.user);
            sent
        };

        if options.do_delete {
            self.delete_transient().await;
        }
        Ok(sent)
    }

    /// Deletes every message in the chat's delete list, most recent first, until the list is empty.
    pub async fn delete_transient(&self) {
        while let Some(message_id) = self.delete_me.pop().await {
            if let Err(e) = self.bot.delete_message(self.chat_id, message_id).await {
                debug!(chat_id = self.chat_id, message_id, error = %e, "Failed to delete transient message");
            }
        }
    }
}

/// Options for [`Edit::edit_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOptions {
    pub escape_markdown: Option<String>,
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<ReplyMarkup>,
}

impl EditOptions {
    pub fn escape_markdown(mut self, escapes: impl Into<String>) -> Self {
        self.escape_markdown = Some(escapes.into());
        self
    }

    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    pub fn reply_markup(mut self, reply_markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(reply_markup);
        self
    }
}

/// Replaces the text of a message in the current chat. Best effort.
#[derive(Clone)]
pub struct Edit {
    bot: Arc<dyn Bot>,
    chat_id: i64,
}

impl Edit {
    pub fn new(bot: Arc<dyn Bot>, chat_id: i64) -> Self {
        Self { bot, chat_id }
    }

    pub async fn edit(&self, message_id: i32, new_text: &str) {
        self.edit_with(message_id, new_text, EditOptions::default())
            .await
    }

    pub async fn edit_with(&self, message_id: i32, new_text: &str, options: EditOptions) {
        let text = escaped(new_text, options.escape_markdown.as_deref());
        let send_options = SendOptions {
            parse_mode: options.parse_mode,
            reply_markup: options.reply_markup,
        };
        if let Err(e) = self
            .bot
            .edit_message_text(self.chat_id, message_id, &text, &send_options)
            .await
        {
            debug!(chat_id = self.chat_id, message_id, error = %e, "Failed to edit message");
        }
    }
}

/// Deletes a message in the current chat. Best effort.
#[derive(Clone)]
pub struct Delete {
    bot: Arc<dyn Bot>,
    chat_id: i64,
}

impl Delete {
    pub fn new(bot: Arc<dyn Bot>, chat_id: i64) -> Self {
        Self { bot, chat_id }
    }

    pub async fn delete(&self, message_id: i32) {
        if let Err(e) = self.bot.delete_message(self.chat_id, message_id).await {
            debug!(chat_id = self.chat_id, message_id, error = %e, "Failed to delete message");
        }
    }
}

/// Answers the callback query of the current update.
#[derive(Clone)]
pub struct CommitCallback {
    bot: Arc<dyn Bot>,
    callback_id: String,
}

impl CommitCallback {
    pub fn new(bot: Arc<dyn Bot>, callback_id: impl Into<String>) -> Self {
        Self {
            bot,
            callback_id: callback_id.into(),
        }
    }

    /// Answers without text; only dismisses the client's loading indicator.
    pub async fn commit(&self) -> Result<()> {
        self.commit_with(CallbackAnswer::default()).await
    }

    pub async fn commit_with(&self, answer: CallbackAnswer) -> Result<()> {
        self.bot
            .answer_callback_query(&self.callback_id, &answer)
            .await
    }
}
