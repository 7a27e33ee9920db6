//! Bot abstraction for sending, editing and deleting messages.
//!
//! [`Bot`] is transport-agnostic; `fbot-telegram` implements it via teloxide, tests use a recording mock.

use crate::error::Result;
use crate::outgoing::{CallbackAnswer, MediaSource, SendOptions, SentMessage};
use async_trait::async_trait;

/// Abstraction over the bot transport. Chat and message ids are Telegram's numeric ids.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> Result<SentMessage>;

    /// Sends a photo with a caption.
    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage>;

    /// Sends a document with a caption.
    async fn send_document(
        &self,
        chat_id: i64,
        document: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage>;

    /// Replaces the text of an already-sent message.
    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        options: &SendOptions,
    ) -> Result<()>;

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;

    /// Answers a callback query so the client stops showing the loading indicator.
    async fn answer_callback_query(&self, callback_id: &str, answer: &CallbackAnswer)
        -> Result<()>;
}
