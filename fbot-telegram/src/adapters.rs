//! Adapters from Telegram (teloxide) types to fbot_core types.
//! Depends only on teloxide and fbot_core type definitions.

use fbot_core::{
    CallbackQuery, Chat, Message, MessageRef, ToCoreMessage, ToCoreUpdate, ToCoreUser, Update,
    UpdateKind, User, Voice,
};
use teloxide::types::UpdateKind as TgUpdateKind;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn chat_to_core(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.0,
            user: msg.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
            chat: chat_to_core(&msg.chat),
            text: msg.text().map(str::to_string),
            caption: msg.caption().map(str::to_string),
            voice: msg.voice().map(|v| Voice {
                file_id: v.file.id.to_string(),
                duration_secs: v.duration.seconds(),
            }),
            created_at: msg.date,
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackQuery`].
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    pub fn to_core(&self) -> CallbackQuery {
        let q = self.0;
        CallbackQuery {
            id: q.id.0.clone(),
            user: TelegramUserWrapper(&q.from).to_core(),
            message: q.message.as_ref().map(|m| MessageRef {
                id: m.id().0,
                chat: chat_to_core(m.chat()),
            }),
            data: q.data.clone(),
        }
    }
}

/// Wraps a teloxide Update; kinds other than messages and callback queries become
/// [`UpdateKind::Other`] carrying the kind's name.
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl<'a> ToCoreUpdate for TelegramUpdateWrapper<'a> {
    fn to_core(&self) -> Update {
        let kind = match &self.0.kind {
            TgUpdateKind::Message(msg) => UpdateKind::Message(TelegramMessageWrapper(msg).to_core()),
            TgUpdateKind::CallbackQuery(q) => {
                UpdateKind::CallbackQuery(TelegramCallbackWrapper(q).to_core())
            }
            TgUpdateKind::EditedMessage(_) => UpdateKind::Other("edited_message".to_string()),
            TgUpdateKind::ChannelPost(_) => UpdateKind::Other("channel_post".to_string()),
            TgUpdateKind::InlineQuery(_) => UpdateKind::Other("inline_query".to_string()),
            _ => UpdateKind::Other("other".to_string()),
        };
        Update {
            id: self.0.id.0,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_UPDATE: &str = r#"{
        "update_id": 11,
        "message": {
            "message_id": 5,
            "date": 1700000000,
            "chat": { "id": 42, "type": "private", "first_name": "Anna" },
            "from": { "id": 7, "is_bot": false, "first_name": "Anna", "username": "anna" },
            "text": "/start"
        }
    }"#;

    const VOICE_MESSAGE: &str = r#"{
        "message_id": 6,
        "date": 1700000000,
        "chat": { "id": 42, "type": "private", "first_name": "Anna" },
        "from": { "id": 7, "is_bot": false, "first_name": "Anna", "username": "anna" },
        "voice": {
            "file_id": "AwACAgIAAx",
            "file_unique_id": "AgADx",
            "duration": 4,
            "mime_type": "audio/ogg",
            "file_size": 4096
        }
    }"#;

    const CALLBACK_UPDATE: &str = r#"{
        "update_id": 12,
        "callback_query": {
            "id": "4382",
            "from": { "id": 7, "is_bot": false, "first_name": "Anna", "username": "anna" },
            "chat_instance": "-51",
            "data": "auth:approve:8",
            "message": {
                "message_id": 5,
                "date": 1700000000,
                "chat": { "id": 42, "type": "private", "first_name": "Anna" },
                "from": { "id": 7, "is_bot": false, "first_name": "Anna", "username": "anna" },
                "text": "Anfrage"
            }
        }
    }"#;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    #[test]
    fn test_text_message_update() {
        let update: teloxide::types::Update = serde_json::from_str(TEXT_UPDATE).unwrap();

        let core = TelegramUpdateWrapper(&update).to_core();

        assert_eq!(core.id, 11);
        let msg = core.message().expect("message update");
        assert_eq!(msg.id, 5);
        assert_eq!(msg.chat.id, 42);
        assert_eq!(msg.chat.chat_type, "private");
        assert_eq!(msg.text.as_deref(), Some("/start"));
        assert_eq!(msg.user.as_ref().map(|u| u.id), Some(7));
        assert!(msg.voice.is_none());
    }

    #[test]
    fn test_voice_message() {
        let msg: teloxide::types::Message = serde_json::from_str(VOICE_MESSAGE).unwrap();

        let core = TelegramMessageWrapper(&msg).to_core();

        let voice = core.voice.expect("voice");
        assert_eq!(voice.file_id, "AwACAgIAAx");
        assert_eq!(voice.duration_secs, 4);
        assert!(core.text.is_none());
    }

    #[test]
    fn test_callback_query_update() {
        let update: teloxide::types::Update = serde_json::from_str(CALLBACK_UPDATE).unwrap();

        let core = TelegramUpdateWrapper(&update).to_core();

        let q = core.callback_query().expect("callback update");
        assert_eq!(q.id, "4382");
        assert_eq!(q.user.id, 7);
        assert_eq!(q.data.as_deref(), Some("auth:approve:8"));
        let anchor = q.message.as_ref().expect("keyboard message");
        assert_eq!(anchor.id, 5);
        assert_eq!(anchor.chat.id, 42);
        assert_eq!(core.effective_chat().map(|c| c.id), Some(42));
    }
}
