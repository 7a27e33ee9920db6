//! Wraps teloxide::Bot and implements [`fbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use fbot_core::{
    Bot as CoreBot, CallbackAnswer, FbotError, MediaSource, ParseMode, ReplyMarkup, Result,
    SendOptions, SentMessage,
};
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile,
    KeyboardButton, KeyboardMarkup, KeyboardRemove, MessageId,
};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements fbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

fn bot_error(e: impl std::fmt::Display) -> FbotError {
    FbotError::Bot(e.to_string())
}

#[allow(deprecated)]
fn parse_mode(mode: ParseMode) -> teloxide::types::ParseMode {
    match mode {
        ParseMode::Markdown => teloxide::types::ParseMode::Markdown,
        ParseMode::MarkdownV2 => teloxide::types::ParseMode::MarkdownV2,
        ParseMode::Html => teloxide::types::ParseMode::Html,
    }
}

fn inline_keyboard(rows: &[Vec<fbot_core::InlineButton>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.text.clone(), b.callback_data.clone()))
            .collect::<Vec<_>>()
    }))
}

fn reply_markup(markup: &ReplyMarkup) -> teloxide::types::ReplyMarkup {
    match markup {
        ReplyMarkup::InlineKeyboard(rows) => inline_keyboard(rows).into(),
        ReplyMarkup::Keyboard(rows) => KeyboardMarkup::new(rows.iter().map(|row| {
            row.iter()
                .map(|text| KeyboardButton::new(text.clone()))
                .collect::<Vec<_>>()
        }))
        .into(),
        ReplyMarkup::RemoveKeyboard => KeyboardRemove::new().into(),
    }
}

fn input_file(source: &MediaSource) -> Result<InputFile> {
    Ok(match source {
        MediaSource::FileId(id) => InputFile::file_id(FileId(id.clone())),
        MediaSource::Url(url) => InputFile::url(reqwest::Url::parse(url).map_err(bot_error)?),
        MediaSource::Path(path) => InputFile::file(path.clone()),
        MediaSource::Memory { bytes, file_name } => {
            InputFile::memory(bytes.clone()).file_name(file_name.clone())
        }
    })
}

fn sent(msg: &teloxide::types::Message) -> SentMessage {
    SentMessage {
        id: msg.id.0,
        chat_id: msg.chat.id.0,
        text: msg.text().or(msg.caption()).map(str::to_string),
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> Result<SentMessage> {
        let mut request = self.bot.send_message(ChatId(chat_id), text.to_string());
        if let Some(mode) = options.parse_mode {
            request = request.parse_mode(parse_mode(mode));
        }
        if let Some(markup) = &options.reply_markup {
            request = request.reply_markup(reply_markup(markup));
        }
        let msg = request.await.map_err(bot_error)?;
        Ok(sent(&msg))
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        let msg = self
            .bot
            .send_photo(ChatId(chat_id), input_file(photo)?)
            .caption(caption.to_string())
            .await
            .map_err(bot_error)?;
        Ok(sent(&msg))
    }

    async fn send_document(
        &self,
        chat_id: i64,
        document: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        let msg = self
            .bot
            .send_document(ChatId(chat_id), input_file(document)?)
            .caption(caption.to_string())
            .await
            .map_err(bot_error)?;
        Ok(sent(&msg))
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        options: &SendOptions,
    ) -> Result<()> {
        let mut request =
            self.bot
                .edit_message_text(ChatId(chat_id), MessageId(message_id), text.to_string());
        if let Some(mode) = options.parse_mode {
            request = request.parse_mode(parse_mode(mode));
        }
        match &options.reply_markup {
            Some(ReplyMarkup::InlineKeyboard(rows)) => {
                request = request.reply_markup(inline_keyboard(rows));
            }
            Some(_) => debug!(
                chat_id,
                message_id,
                "Edits only accept inline keyboards; markup dropped"
            ),
            None => {}
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn answer_callback_query(
        &self,
        callback_id: &str,
        answer: &CallbackAnswer,
    ) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(text) = &answer.text {
            request = request.text(text.clone());
        }
        if answer.show_alert {
            request = request.show_alert(true);
        }
        if let Some(url) = &answer.url {
            request = request.url(reqwest::Url::parse(url).map_err(bot_error)?);
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }
}
