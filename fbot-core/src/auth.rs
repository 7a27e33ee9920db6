//! Authorization lookup used by the `requires_authorization` gate.

use crate::error::Result;
use crate::types::User;
use async_trait::async_trait;

/// Decides whether a user may use the bot and records access requests.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    /// True if the user has been authorized by an administrator.
    async fn is_authorized(&self, user: &User) -> Result<bool>;

    /// Records a pending request from `user` in `chat_id`. Returns true if this is a new request,
    /// false if the user already has a record (pending, authorized or revoked).
    async fn request_authorization(&self, user: &User, chat_id: i64) -> Result<bool>;
}
