//! Per-user key/value data (the bot's "user data" bag).
//!
//! Values are plain strings keyed by `(user_id, key)`. Writes overwrite unconditionally.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;

/// Key/value store scoped by user.
#[async_trait]
pub trait UserDataStore: Send + Sync {
    /// Returns the stored value, or None if the key was never set for this user.
    async fn get_value(&self, user_id: i64, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value`, replacing any previous one.
    async fn set_value(&self, user_id: i64, key: &str, value: &str) -> Result<(), StorageError>;
}

/// SQLite-backed [`UserDataStore`]; table `user_data`.
#[derive(Clone)]
pub struct SqliteUserDataStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteUserDataStore {
    /// Wraps the pool and creates the table if it does not exist.
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating user_data table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_data (
                user_id INTEGER NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (user_id, key)
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserDataStore for SqliteUserDataStore {
    #[instrument(skip(self))]
    async fn get_value(&self, user_id: i64, key: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM user_data WHERE user_id = ? AND key = ?")
                .bind(user_id)
                .bind(key)
                .fetch_optional(self.pool_manager.pool())
                .await?;

        debug!(user_id, key, found = row.is_some(), "user_data lookup");
        Ok(row.map(|(value,)| value))
    }

    #[instrument(skip(self, value))]
    async fn set_value(&self, user_id: i64, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO user_data (user_id, key, value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        info!(user_id, key, "Saved user data");
        Ok(())
    }
}

/// Process-local [`UserDataStore`]; contents are lost on exit.
#[derive(Default)]
pub struct InMemoryUserDataStore {
    values: RwLock<HashMap<(i64, String), String>>,
}

impl InMemoryUserDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDataStore for InMemoryUserDataStore {
    async fn get_value(&self, user_id: i64, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .values
            .read()
            .await
            .get(&(user_id, key.to_string()))
            .cloned())
    }

    async fn set_value(&self, user_id: i64, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .write()
            .await
            .insert((user_id, key.to_string()), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_get_unset_is_none() {
        let store = InMemoryUserDataStore::new();
        assert!(store.get_value(1, "k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_set_overwrites_and_scopes_by_user() {
        let store = InMemoryUserDataStore::new();
        store.set_value(1, "k", "a").await.unwrap();
        store.set_value(1, "k", "b").await.unwrap();
        store.set_value(2, "k", "other").await.unwrap();

        assert_eq!(store.get_value(1, "k").await.unwrap().as_deref(), Some("b"));
        assert_eq!(
            store.get_value(2, "k").await.unwrap().as_deref(),
            Some("other")
        );
    }
}
