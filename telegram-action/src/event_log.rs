//! Structured log events for incoming updates and outgoing responses.

use fbot_core::{CallbackQuery, Message, SentMessage, Update, UpdateKind, User};
use tracing::{info, warn};

pub fn log_incoming_message(user: &User, message: &Message) {
    info!(
        user_id = user.id,
        username = %user.username.as_deref().unwrap_or("unknown"),
        chat_id = message.chat.id,
        message_id = message.id,
        message_content = %message.text.as_deref().or(message.caption.as_deref()).unwrap_or(""),
        "Received message"
    );
}

pub fn log_incoming_callback(user: &User, callback: &CallbackQuery) {
    info!(
        user_id = user.id,
        username = %user.username.as_deref().unwrap_or("unknown"),
        chat_id = ?callback.message.as_ref().map(|m| m.chat.id),
        original_message_id = ?callback.message.as_ref().map(|m| m.id),
        callback_data = %callback.data.as_deref().unwrap_or(""),
        "Received callback"
    );
}

pub fn log_incoming_voice(user: &User, message: &Message) {
    info!(
        user_id = user.id,
        username = %user.username.as_deref().unwrap_or("unknown"),
        chat_id = message.chat.id,
        message_id = message.id,
        duration_secs = ?message.voice.as_ref().map(|v| v.duration_secs),
        "Received voice message"
    );
}

pub fn log_response(sent: &SentMessage, to: &User) {
    info!(
        user_id = to.id,
        username = %to.username.as_deref().unwrap_or("unknown"),
        chat_id = sent.chat_id,
        message_id = sent.id,
        response = %sent.text.as_deref().unwrap_or(""),
        "Sent response"
    );
}

/// Logs an update on intake according to its kind.
pub fn log_incoming(update: &Update) {
    match (&update.kind, update.effective_user()) {
        (UpdateKind::Message(message), Some(user)) if message.voice.is_some() => {
            log_incoming_voice(user, message)
        }
        (UpdateKind::Message(message), Some(user)) => log_incoming_message(user, message),
        (UpdateKind::CallbackQuery(callback), _) => log_incoming_callback(&callback.user, callback),
        _ => warn!(
            update_id = update.id,
            kind = %update.kind_name(),
            "Received update without handler support"
        ),
    }
}
