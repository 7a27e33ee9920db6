//! Recording [`fbot_core::Bot`] for driving the bundled actions without Telegram.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fbot_core::{Bot, CallbackAnswer, MediaSource, Result, SendOptions, SentMessage};

#[derive(Default)]
pub struct MockBot {
    next_id: AtomicI32,
    texts: Mutex<Vec<(i64, String)>>,
    edits: Mutex<Vec<(i64, i32, String)>>,
    answers: Mutex<Vec<CallbackAnswer>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI32::new(100),
            ..Self::default()
        })
    }

    pub fn texts(&self) -> Vec<(i64, String)> {
        self.texts.lock().unwrap().clone()
    }

    /// Texts sent to `chat_id`, oldest first.
    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.texts()
            .into_iter()
            .filter(|(chat, _)| *chat == chat_id)
            .map(|(_, text)| text)
            .collect()
    }

    pub fn edits(&self) -> Vec<(i64, i32, String)> {
        self.edits.lock().unwrap().clone()
    }

    pub fn answers(&self) -> Vec<CallbackAnswer> {
        self.answers.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.texts.lock().unwrap().clear();
        self.edits.lock().unwrap().clear();
        self.answers.lock().unwrap().clear();
    }

    fn record(&self, chat_id: i64, text: &str) -> SentMessage {
        self.texts.lock().unwrap().push((chat_id, text.to_string()));
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
        Ok(self.record(chat_id, text))
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        _photo: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        Ok(self.record(chat_id, caption))
    }

    async fn send_document(
        &self,
        chat_id: i64,
        _document: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        Ok(self.record(chat_id, caption))
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        _options: &SendOptions,
    ) -> Result<()> {
        self.edits
            .lock()
            .unwrap()
            .push((chat_id, message_id, text.to_string()));
        Ok(())
    }

    async fn delete_message(&self, _chat_id: i64, _message_id: i32) -> Result<()> {
        Ok(())
    }

    async fn answer_callback_query(
        &self,
        _callback_id: &str,
        answer: &CallbackAnswer,
    ) -> Result<()> {
        self.answers.lock().unwrap().push(answer.clone());
        Ok(())
    }
}
