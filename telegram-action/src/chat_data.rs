//! Per-chat conversation state: the list of transient bot messages to delete and a free-form map.
//!
//! State lives in memory only and is created on first access for a chat id.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use fbot_core::{FbotError, Result};

#[derive(Debug, Default)]
struct ChatData {
    delete_me: Vec<i32>,
    values: HashMap<String, Value>,
}

/// All chats' data, keyed by chat id. Cheap to clone; clones share state.
///
/// Entries are never evicted: a chat's data lives as long as the process.
#[derive(Clone, Default)]
pub struct ChatStore {
    chats: Arc<Mutex<HashMap<i64, Arc<Mutex<ChatData>>>>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the data of `chat_id`, creating it empty if this chat has none yet.
    pub async fn chat(&self, chat_id: i64) -> ChatDataHandle {
        let mut chats = self.chats.lock().await;
        let data = chats.entry(chat_id).or_default().clone();
        ChatDataHandle { chat_id, data }
    }

    /// Number of chats with state.
    pub async fn len(&self) -> usize {
        self.chats.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chats.lock().await.is_empty()
    }
}

/// Shared handle to one chat's data.
#[derive(Clone)]
pub struct ChatDataHandle {
    chat_id: i64,
    data: Arc<Mutex<ChatData>>,
}

impl ChatDataHandle {
    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub fn delete_me(&self) -> DeleteMe {
        DeleteMe(self.clone())
    }

    pub fn chat_dict(&self) -> ChatDict {
        ChatDict(self.clone())
    }
}

/// Ids of transient bot messages in this chat; the next response deletes them.
#[derive(Clone)]
pub struct DeleteMe(ChatDataHandle);

impl DeleteMe {
    /// Marks a message for deletion on the next response.
    pub async fn push(&self, message_id: i32) {
        self.0.data.lock().await.delete_me.push(message_id);
    }

    /// Takes the most recently pushed id.
    pub async fn pop(&self) -> Option<i32> {
        self.0.data.lock().await.delete_me.pop()
    }

    /// Snapshot of the pending ids, oldest first.
    pub async fn ids(&self) -> Vec<i32> {
        self.0.data.lock().await.delete_me.clone()
    }

    pub async fn len(&self) -> usize {
        self.0.data.lock().await.delete_me.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.0.data.lock().await.delete_me.is_empty()
    }
}

/// Free-form per-chat values (JSON), shared across the conversation.
#[derive(Clone)]
pub struct ChatDict(ChatDataHandle);

impl ChatDict {
    /// Returns the value under `key` decoded as `T`; None if missing or of another shape.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.0.data.lock().await.values.get(key).cloned()?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(chat_id = self.0.chat_id, key = %key, error = %e, "chat_dict value has unexpected shape");
                None
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: impl Into<String>, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| FbotError::Unknown(e.to_string()))?;
        self.0.data.lock().await.values.insert(key.into(), value);
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.0.data.lock().await.values.remove(key)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.0.data.lock().await.values.contains_key(key)
    }
}
