//! Per-conversation dialog state, stored as opaque JSON text.
//!
//! The dialogs crate owns the stack format; this module only persists the serialized form.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::sqlite_pool::SqlitePoolManager;

/// Store of serialized dialog stacks keyed by conversation id.
#[async_trait]
pub trait DialogStateStore: Send + Sync {
    async fn load(&self, conversation_id: &str) -> Result<Option<String>, StorageError>;
    async fn save(&self, conversation_id: &str, state: &str) -> Result<(), StorageError>;
    /// Removes the conversation's state; no-op if absent.
    async fn clear(&self, conversation_id: &str) -> Result<(), StorageError>;
}

/// SQLite-backed [`DialogStateStore`]; table `dialog_state`.
#[derive(Clone)]
pub struct SqliteDialogStateStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteDialogStateStore {
    /// Wraps the pool and creates the table if it does not exist.
    pub async fn new(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating dialog_state table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dialog_state (
                conversation_id TEXT PRIMARY KEY,
                stack TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl DialogStateStore for SqliteDialogStateStore {
    async fn load(&self, conversation_id: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT stack FROM dialog_state WHERE conversation_id = ?")
                .bind(conversation_id)
                .fetch_optional(self.pool_manager.pool())
                .await?;
        debug!(conversation_id, found = row.is_some(), "dialog_state lookup");
        Ok(row.map(|(stack,)| stack))
    }

    async fn save(&self, conversation_id: &str, state: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO dialog_state (conversation_id, stack, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(conversation_id) DO UPDATE SET
                stack = excluded.stack,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(conversation_id)
        .bind(state)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    async fn clear(&self, conversation_id: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM dialog_state WHERE conversation_id = ?")
            .bind(conversation_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }
}

/// Process-local [`DialogStateStore`].
#[derive(Default)]
pub struct InMemoryDialogStateStore {
    states: RwLock<HashMap<String, String>>,
}

impl InMemoryDialogStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DialogStateStore for InMemoryDialogStateStore {
    async fn load(&self, conversation_id: &str) -> Result<Option<String>, StorageError> {
        Ok(self.states.read().await.get(conversation_id).cloned())
    }

    async fn save(&self, conversation_id: &str, state: &str) -> Result<(), StorageError> {
        self.states
            .write()
            .await
            .insert(conversation_id.to_string(), state.to_string());
        Ok(())
    }

    async fn clear(&self, conversation_id: &str) -> Result<(), StorageError> {
        self.states.write().await.remove(conversation_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_state_is_per_conversation() {
        let store = InMemoryDialogStateStore::new();
        store.save("a", "1").await.unwrap();
        store.save("b", "2").await.unwrap();
        store.clear("a").await.unwrap();

        assert!(store.load("a").await.unwrap().is_none());
        assert_eq!(store.load("b").await.unwrap().as_deref(), Some("2"));
    }
}
