//! Mock implementation of [`fbot_core::Bot`] for integration tests.
//!
//! Records sent texts, deletions and callback answers so tests can assert on what the bot did
//! without hitting Telegram.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fbot_core::{Bot, CallbackAnswer, MediaSource, Result, SendOptions, SentMessage};

#[derive(Default)]
pub struct MockBot {
    next_id: AtomicI32,
    pub texts: Mutex<Vec<(i64, String)>>,
    pub deleted: Mutex<Vec<(i64, i32)>>,
    pub answered: Mutex<Vec<(String, Option<String>)>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI32::new(1),
            ..Self::default()
        })
    }

    pub fn texts(&self) -> Vec<(i64, String)> {
        self.texts.lock().unwrap().clone()
    }

    fn sent(&self, chat_id: i64, text: &str) -> SentMessage {
        SentMessage {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            chat_id,
            text: Some(text.to_string()),
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        _options: &SendOptions,
    ) -> Result<SentMessage> {
        self.texts.lock().unwrap().push((chat_id, text.to_string()));
        Ok(self.sent(chat_id, text))
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        _photo: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        Ok(self.sent(chat_id, caption))
    }

    async fn send_document(
        &self,
        chat_id: i64,
        _document: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        Ok(self.sent(chat_id, caption))
    }

    async fn edit_message_text(
        &self,
        _chat_id: i64,
        _message_id: i32,
        _text: &str,
        _options: &SendOptions,
    ) -> Result<()> {
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.deleted.lock().unwrap().push((chat_id, message_id));
        Ok(())
    }

    async fn answer_callback_query(
        &self,
        callback_id: &str,
        answer: &CallbackAnswer,
    ) -> Result<()> {
        self.answered
            .lock()
            .unwrap()
            .push((callback_id.to_string(), answer.text.clone()));
        Ok(())
    }
}
