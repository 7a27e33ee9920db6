//! Route updates to handlers: commands, callback data prefixes, and plain text.
//!
//! A filter that does not match returns [`HandlerResponse::Ignore`] so the chain moves on.

use async_trait::async_trait;
use fbot_core::{Handler, HandlerResponse, Result, Update};

/// Splits `/cmd@bot rest` into (`cmd`, `rest`). Returns None if `text` is not a command.
pub fn split_command(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix('/')?;
    let (head, rest) = match body.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (body, ""),
    };
    let command = head.split('@').next().unwrap_or(head);
    if command.is_empty() {
        return None;
    }
    Some((command, rest))
}

/// Arguments following a command, e.g. `"123"` for `/authorize 123`; empty if none.
pub fn command_args(text: &str) -> &str {
    split_command(text).map(|(_, rest)| rest).unwrap_or("")
}

/// Runs `inner` for messages whose text is the command `/name` (with optional `@bot` and arguments).
pub struct OnCommand<H> {
    command: String,
    inner: H,
}

impl<H: Handler> OnCommand<H> {
    pub fn new(command: impl Into<String>, inner: H) -> Self {
        Self {
            command: command.into(),
            inner,
        }
    }

    fn matches(&self, update: &Update) -> bool {
        update
            .message()
            .and_then(|m| m.text.as_deref())
            .and_then(split_command)
            .is_some_and(|(command, _)| command == self.command)
    }
}

#[async_trait]
impl<H: Handler> Handler for OnCommand<H> {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        if !self.matches(update) {
            return Ok(HandlerResponse::Ignore);
        }
        self.inner.handle(update).await
    }
}

/// Runs `inner` for callback queries whose data starts with `prefix`.
pub struct OnCallback<H> {
    prefix: String,
    inner: H,
}

impl<H: Handler> OnCallback<H> {
    pub fn new(prefix: impl Into<String>, inner: H) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }
}

#[async_trait]
impl<H: Handler> Handler for OnCallback<H> {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let matched = update
            .callback_query()
            .and_then(|q| q.data.as_deref())
            .is_some_and(|data| data.starts_with(&self.prefix));
        if !matched {
            return Ok(HandlerResponse::Ignore);
        }
        self.inner.handle(update).await
    }
}

/// Runs `inner` for text messages that are not commands.
pub struct OnText<H> {
    inner: H,
}

impl<H: Handler> OnText<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<H: Handler> Handler for OnText<H> {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let matched = update
            .message()
            .and_then(|m| m.text.as_deref())
            .is_some_and(|text| split_command(text).is_none());
        if !matched {
            return Ok(HandlerResponse::Ignore);
        }
        self.inner.handle(update).await
    }
}
