//! Recording mock of [`fbot_core::Bot`] and an in-memory authorization store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fbot_core::{
    AuthorizationStore, Bot, CallbackAnswer, FbotError, MediaSource, Result, SendOptions,
    SentMessage, User,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    SendMessage {
        chat_id: i64,
        text: String,
        options: SendOptions,
    },
    SendPhoto {
        chat_id: i64,
        photo: MediaSource,
        caption: String,
    },
    SendDocument {
        chat_id: i64,
        document: MediaSource,
        caption: String,
    },
    EditMessage {
        chat_id: i64,
        message_id: i32,
        text: String,
    },
    DeleteMessage {
        chat_id: i64,
        message_id: i32,
    },
    AnswerCallback {
        callback_id: String,
        answer: CallbackAnswer,
    },
}

/// Records every call; sent messages get increasing ids starting at 1000.
pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
    next_id: AtomicI32,
    fail_deletes: bool,
    fail_edits: bool,
    fail_sends: bool,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::build(false, false, false))
    }

    /// Delete and edit calls are recorded, then fail.
    pub fn failing_cleanup() -> Arc<Self> {
        Arc::new(Self::build(true, true, false))
    }

    pub fn failing_sends() -> Arc<Self> {
        Arc::new(Self::build(false, false, true))
    }

    fn build(fail_deletes: bool, fail_edits: bool, fail_sends: bool) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1000),
            fail_deletes,
            fail_edits,
            fail_sends,
        }
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<(i64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::SendMessage { chat_id, text, .. } => Some((chat_id, text)),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<i32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::DeleteMessage { message_id, .. } => Some(message_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn sent(&self, chat_id: i64, text: &str) -> Result<SentMessage> {
        if self.fail_sends {
            return Err(FbotError::Bot("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(SentMessage {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            chat_id,
            text: Some(text.to_string()),
        })
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        options: &SendOptions,
    ) -> Result<SentMessage> {
        self.record(BotCall::SendMessage {
            chat_id,
            text: text.to_string(),
            options: options.clone(),
        });
        self.sent(chat_id, text)
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        self.record(BotCall::SendPhoto {
            chat_id,
            photo: photo.clone(),
            caption: caption.to_string(),
        });
        self.sent(chat_id, caption)
    }

    async fn send_document(
        &self,
        chat_id: i64,
        document: &MediaSource,
        caption: &str,
    ) -> Result<SentMessage> {
        self.record(BotCall::SendDocument {
            chat_id,
            document: document.clone(),
            caption: caption.to_string(),
        });
        self.sent(chat_id, caption)
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        _options: &SendOptions,
    ) -> Result<()> {
        self.record(BotCall::EditMessage {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        if self.fail_edits {
            return Err(FbotError::Bot("Bad Request: message is not modified".to_string()));
        }
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.record(BotCall::DeleteMessage {
            chat_id,
            message_id,
        });
        if self.fail_deletes {
            return Err(FbotError::Bot("Bad Request: message to delete not found".to_string()));
        }
        Ok(())
    }

    async fn answer_callback_query(
        &self,
        callback_id: &str,
        answer: &CallbackAnswer,
    ) -> Result<()> {
        self.record(BotCall::AnswerCallback {
            callback_id: callback_id.to_string(),
            answer: answer.clone(),
        });
        Ok(())
    }
}

/// Authorization store backed by a set of authorized user ids; records requests.
#[derive(Default)]
pub struct InMemoryAuthorizationStore {
    authorized: Mutex<HashSet<i64>>,
    requests: Mutex<Vec<(i64, i64)>>,
}

impl InMemoryAuthorizationStore {
    pub fn with_authorized(user_ids: &[i64]) -> Arc<Self> {
        let store = Self::default();
        store.authorized.lock().unwrap().extend(user_ids.iter().copied());
        Arc::new(store)
    }

    /// (user_id, chat_id) of every recorded request.
    pub fn requests(&self) -> Vec<(i64, i64)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorizationStore for InMemoryAuthorizationStore {
    async fn is_authorized(&self, user: &User) -> Result<bool> {
        Ok(self.authorized.lock().unwrap().contains(&user.id))
    }

    async fn request_authorization(&self, user: &User, chat_id: i64) -> Result<bool> {
        let mut requests = self.requests.lock().unwrap();
        if requests.iter().any(|(id, _)| *id == user.id) {
            return Ok(false);
        }
        requests.push((user.id, chat_id));
        Ok(true)
    }
}
