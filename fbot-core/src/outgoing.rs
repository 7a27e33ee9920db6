//! Types for what the bot sends: media sources, parse modes, keyboards, callback answers.

use std::path::PathBuf;

/// A message the transport confirmed as sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub id: i32,
    pub chat_id: i64,
    /// Text or caption of the sent message, if any.
    pub text: Option<String>,
}

/// Where a photo or document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// A file already on Telegram's servers.
    FileId(String),
    Url(String),
    Path(PathBuf),
    Memory { bytes: Vec<u8>, file_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn callback(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    InlineKeyboard(Vec<Vec<InlineButton>>),
    /// Custom reply keyboard; each string is a button label.
    Keyboard(Vec<Vec<String>>),
    RemoveKeyboard,
}

/// Formatting options for text messages and edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<ReplyMarkup>,
}

/// Answer to a callback query (the small toast / alert shown to the user).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackAnswer {
    pub text: Option<String>,
    pub show_alert: bool,
    pub url: Option<String>,
}

impl CallbackAnswer {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            show_alert: true,
            url: None,
        }
    }
}
