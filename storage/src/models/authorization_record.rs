//! Authorization record model for persistence.
//!
//! Maps to the `authorizations` table and is used by AuthorizationRepository.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use fbot_core::User;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationStatus {
    Pending,
    Authorized,
    Revoked,
}

impl AuthorizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::Pending => "pending",
            AuthorizationStatus::Authorized => "authorized",
            AuthorizationStatus::Revoked => "revoked",
        }
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorizationStatus {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AuthorizationStatus::Pending),
            "authorized" => Ok(AuthorizationStatus::Authorized),
            "revoked" => Ok(AuthorizationStatus::Revoked),
            other => Err(StorageError::Database(format!(
                "unknown authorization status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthorizationRecord {
    pub user_id: i64,
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl AuthorizationRecord {
    /// Creates a pending request for `user`, asked from `chat_id`, timestamped now.
    pub fn pending(user: &User, chat_id: i64) -> Self {
        Self {
            user_id: user.id,
            chat_id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            status: AuthorizationStatus::Pending.to_string(),
            requested_at: Utc::now(),
            decided_at: None,
        }
    }

    pub fn status(&self) -> Result<AuthorizationStatus, StorageError> {
        self.status.parse()
    }

    pub fn is_authorized(&self) -> bool {
        self.status == AuthorizationStatus::Authorized.as_str()
    }

    /// The requesting user as stored at request time.
    pub fn user(&self) -> User {
        User {
            id: self.user_id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}
