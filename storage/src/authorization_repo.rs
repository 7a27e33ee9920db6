//! Authorization repository: who may use the bot, and who is still waiting for a decision.
//!
//! Uses SqlitePoolManager and AuthorizationRecord. Implements [`fbot_core::AuthorizationStore`]
//! for the `requires_authorization` gate and [`Repository`] for generic access.

use async_trait::async_trait;
use chrono::Utc;
use fbot_core::{AuthorizationStore, User};
use tracing::info;

use crate::error::StorageError;
use crate::models::{AuthorizationRecord, AuthorizationStatus};
use crate::repository::Repository;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct AuthorizationRepository {
    pool_manager: SqlitePoolManager,
}

impl AuthorizationRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating authorization tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS authorizations (
                user_id INTEGER PRIMARY KEY,
                chat_id INTEGER NOT NULL,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                status TEXT NOT NULL,
                requested_at TEXT NOT NULL,
                decided_at TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_authorizations_status ON authorizations(status)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn find(&self, user_id: i64) -> Result<Option<AuthorizationRecord>, StorageError> {
        let record = sqlx::query_as::<_, AuthorizationRecord>(
            "SELECT * FROM authorizations WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(record)
    }

    /// Inserts a pending request unless the user already has a row. Returns true if inserted.
    pub async fn request(&self, user: &User, chat_id: i64) -> Result<bool, StorageError> {
        let record = AuthorizationRecord::pending(user, chat_id);
        let result = sqlx::query(
            r#"
            INSERT INTO authorizations (user_id, chat_id, username, first_name, last_name, status, requested_at, decided_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, NULL)
            ON CONFLICT(user_id) DO NOTHING
            "#,
        )
        .bind(record.user_id)
        .bind(record.chat_id)
        .bind(&record.username)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.status)
        .bind(record.requested_at)
        .execute(self.pool_manager.pool())
        .await?;

        let inserted = result.rows_affected() == 1;
        if inserted {
            info!(user_id = user.id, chat_id, "Authorization requested");
        }
        Ok(inserted)
    }

    pub async fn authorize(&self, user_id: i64) -> Result<bool, StorageError> {
        self.set_status(user_id, AuthorizationStatus::Authorized).await
    }

    pub async fn revoke(&self, user_id: i64) -> Result<bool, StorageError> {
        self.set_status(user_id, AuthorizationStatus::Revoked).await
    }

    /// Returns whether a row changed; setting the current status again counts as no change.
    async fn set_status(
        &self,
        user_id: i64,
        status: AuthorizationStatus,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE authorizations SET status = ?, decided_at = ? WHERE user_id = ? AND status <> ?",
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(user_id)
        .bind(status.as_str())
        .execute(self.pool_manager.pool())
        .await?;

        let changed = result.rows_affected() > 0;
        info!(user_id, status = %status, changed, "Authorization status updated");
        Ok(changed)
    }

    pub async fn is_user_authorized(&self, user_id: i64) -> Result<bool, StorageError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM authorizations WHERE user_id = ? AND status = ?",
        )
        .bind(user_id)
        .bind(AuthorizationStatus::Authorized.as_str())
        .fetch_one(self.pool_manager.pool())
        .await?;
        Ok(count.0 > 0)
    }

    /// Pending requests, oldest first.
    pub async fn list_pending(&self) -> Result<Vec<AuthorizationRecord>, StorageError> {
        let records = sqlx::query_as::<_, AuthorizationRecord>(
            "SELECT * FROM authorizations WHERE status = ? ORDER BY requested_at ASC",
        )
        .bind(AuthorizationStatus::Pending.as_str())
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(records)
    }
}

fn parse_user_id(id: &str) -> Result<i64, StorageError> {
    id.parse()
        .map_err(|_| StorageError::InvalidId(id.to_string()))
}

#[async_trait]
impl Repository<AuthorizationRecord> for AuthorizationRepository {
    /// Inserts or replaces the row for `entity.user_id`.
    async fn save(&self, entity: &AuthorizationRecord) -> Result<(), StorageError> {
        entity.status()?;
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO authorizations (user_id, chat_id, username, first_name, last_name, status, requested_at, decided_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entity.user_id)
        .bind(entity.chat_id)
        .bind(&entity.username)
        .bind(&entity.first_name)
        .bind(&entity.last_name)
        .bind(&entity.status)
        .bind(entity.requested_at)
        .bind(entity.decided_at)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AuthorizationRecord>, StorageError> {
        self.find(parse_user_id(id)?).await
    }

    async fn find_all(&self) -> Result<Vec<AuthorizationRecord>, StorageError> {
        let records = sqlx::query_as::<_, AuthorizationRecord>(
            "SELECT * FROM authorizations ORDER BY requested_at ASC",
        )
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM authorizations WHERE user_id = ?")
            .bind(parse_user_id(id)?)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AuthorizationStore for AuthorizationRepository {
    async fn is_authorized(&self, user: &User) -> fbot_core::Result<bool> {
        Ok(self.is_user_authorized(user.id).await?)
    }

    async fn request_authorization(&self, user: &User, chat_id: i64) -> fbot_core::Result<bool> {
        Ok(self.request(user, chat_id).await?)
    }
}
