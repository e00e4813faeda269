//! # Mutation Queue Store
//!
//! Durable local persistence for pending mutations, backed by SQLite.
//! Items survive process restarts and offline periods; each operation is a
//! self-contained statement against the connection pool, with no cross-call
//! transactional guarantee.
//!
//! Listing returns items in enqueue order, so create-then-update sequences
//! queued offline replay in the order they were submitted.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::config::AppConfig;
use crate::offline::mutation::QueueItem;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, sqlx::Error>;

/// Durable pending-mutation store
#[derive(Debug, Clone)]
pub struct MutationQueueStore {
    pool: SqlitePool,
}

impl MutationQueueStore {
    /// Open or create the queue database at `path`
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
        sqlx::query("PRAGMA synchronous=NORMAL").execute(&pool).await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Open the store at the configured location
    pub async fn open_with_config(config: &AppConfig) -> Result<Self> {
        Self::open(config.queue_db_path()).await
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS mutation_queue (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                payload TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Persist a queue item
    ///
    /// Assigns `created_at` when the item does not carry one. Writing an id
    /// that already exists overwrites the stored item instead of duplicating
    /// it.
    pub async fn add(&self, item: &QueueItem) -> Result<()> {
        let created_at = if item.created_at.is_empty() {
            chrono::Utc::now().to_rfc3339()
        } else {
            item.created_at.clone()
        };
        let payload = item.payload.to_string();

        sqlx::query(
            "INSERT OR REPLACE INTO mutation_queue (id, kind, payload, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.kind)
        .bind(&payload)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All currently stored items, oldest first
    pub async fn list(&self) -> Result<Vec<QueueItem>> {
        let rows = sqlx::query(
            "SELECT id, kind, payload, created_at FROM mutation_queue
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let payload: String = row.try_get("payload")?;
            items.push(QueueItem {
                id: row.try_get("id")?,
                kind: row.try_get("kind")?,
                payload: serde_json::from_str(&payload).unwrap_or(serde_json::Value::Null),
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(items)
    }

    /// Delete the item with this id; missing ids are a no-op
    pub async fn remove(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM mutation_queue WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Close the connection pool; every later operation fails
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Delete all items (administrative operation, not part of normal sync)
    pub async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM mutation_queue")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Number of pending items
    pub async fn len(&self) -> Result<u64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mutation_queue")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0 as u64)
    }

    /// Whether the queue is empty
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offline::mutation::{MutationPayload, QueueItem};
    use serde_json::json;

    async fn scratch_store() -> (tempfile::TempDir, MutationQueueStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MutationQueueStore::open(dir.path().join("queue.db"))
            .await
            .unwrap();
        (dir, store)
    }

    fn insert_item(title: &str) -> QueueItem {
        let mut data = serde_json::Map::new();
        data.insert("title".to_string(), json!(title));
        QueueItem::new(&MutationPayload::insert("todos", data))
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let (_dir, store) = scratch_store().await;
        let item = insert_item("Buy milk");
        store.add(&item).await.unwrap();

        let items = store.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, item.id);
        assert_eq!(items[0].payload, item.payload);
        assert!(!items[0].created_at.is_empty());
    }

    #[tokio::test]
    async fn test_add_is_idempotent_on_id() {
        let (_dir, store) = scratch_store().await;
        let item = insert_item("Buy milk");
        store.add(&item).await.unwrap();
        store.add(&item).await.unwrap();
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_id_is_noop() {
        let (_dir, store) = scratch_store().await;
        store.remove("no-such-id").await.unwrap();
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_fifo() {
        let (_dir, store) = scratch_store().await;
        for (i, title) in ["first", "second", "third"].iter().enumerate() {
            let mut item = insert_item(title);
            // Distinct timestamps so ordering does not depend on id tiebreak
            item.created_at = format!("2024-05-01T00:00:0{}Z", i);
            store.add(&item).await.unwrap();
        }

        let items = store.list().await.unwrap();
        let titles: Vec<String> = items
            .iter()
            .map(|i| i.payload["data"]["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let (_dir, store) = scratch_store().await;
        store.close().await;
        assert!(store.add(&insert_item("late")).await.is_err());
        assert!(store.list().await.is_err());
    }

    #[tokio::test]
    async fn test_clear() {
        let (_dir, store) = scratch_store().await;
        store.add(&insert_item("a")).await.unwrap();
        store.add(&insert_item("b")).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_items_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.db");

        let store = MutationQueueStore::open(&path).await.unwrap();
        store.add(&insert_item("persisted")).await.unwrap();
        drop(store);

        let reopened = MutationQueueStore::open(&path).await.unwrap();
        assert_eq!(reopened.len().await.unwrap(), 1);
    }
}
