//! SQLite implementation of the ListStore.
//!
//! One row per item occurrence. Removal is a single statement that picks the
//! lowest-id matching row and deletes it, so find-then-delete cannot drift
//! under concurrent writers the way a positional delete would.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::ports::ListStore;

#[derive(Clone)]
pub struct SqliteListStore {
    pool: SqlitePool,
}

impl SqliteListStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListStore for SqliteListStore {
    async fn append(&self, partition: &str, item: &str) -> DomainResult<()> {
        sqlx::query("INSERT INTO list_items (partition_key, item, created_at) VALUES (?, ?, ?)")
            .bind(partition)
            .bind(item)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn items(&self, partition: &str) -> DomainResult<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT item FROM list_items WHERE partition_key = ? ORDER BY id ASC")
                .bind(partition)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(item,)| item).collect())
    }

    async fn remove_first(&self, partition: &str, item: &str) -> DomainResult<bool> {
        let result = sqlx::query(
            r#"DELETE FROM list_items WHERE id = (
                   SELECT id FROM list_items
                   WHERE partition_key = ? AND item = ?
                   ORDER BY id ASC LIMIT 1
               )"#,
        )
        .bind(partition)
        .bind(item)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
