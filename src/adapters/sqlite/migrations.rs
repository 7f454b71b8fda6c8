//! Embedded schema migrations for the durable list store.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Failed to execute migration {version}: {source}")]
    ExecutionError { version: i64, #[source] source: sqlx::Error },
    #[error("Failed to get schema version: {0}")]
    VersionCheckError(#[source] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub sql: &'static str,
}

pub struct Migrator {
    pool: SqlitePool,
}

impl Migrator {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply every migration newer than the recorded schema version.
    ///
    /// Returns how many were applied.
    pub async fn run(&self, migrations: &[Migration]) -> Result<usize, MigrationError> {
        self.ensure_migrations_table().await?;
        let current_version = self.current_version().await?;

        let mut applied = 0;
        for migration in migrations.iter().filter(|m| m.version > current_version) {
            self.apply(migration).await?;
            info!(version = migration.version, description = migration.description, "Applied migration");
            applied += 1;
        }
        Ok(applied)
    }

    async fn ensure_migrations_table(&self) -> Result<(), MigrationError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now')),
                description TEXT
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MigrationError::ExecutionError { version: 0, source: e })?;
        Ok(())
    }

    pub async fn current_version(&self) -> Result<i64, MigrationError> {
        let (version,): (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(MigrationError::VersionCheckError)?;
        Ok(version)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), MigrationError> {
        let to_error = |e: sqlx::Error| MigrationError::ExecutionError { version: migration.version, source: e };

        let mut tx = self.pool.begin().await.map_err(to_error)?;
        sqlx::raw_sql(migration.sql).execute(&mut *tx).await.map_err(to_error)?;
        sqlx::query("INSERT INTO schema_migrations (version, description) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(to_error)?;
        tx.commit().await.map_err(to_error)
    }
}

pub fn all_embedded_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        description: "Create list_items",
        sql: include_str!("../../../migrations/001_list_items.sql"),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_test_pool;

    #[tokio::test]
    async fn test_migrations_apply_once() {
        let pool = create_test_pool().await.unwrap();
        let migrator = Migrator::new(pool);

        assert_eq!(migrator.run(&all_embedded_migrations()).await.unwrap(), 1);
        assert_eq!(migrator.current_version().await.unwrap(), 1);
        assert_eq!(migrator.run(&all_embedded_migrations()).await.unwrap(), 0);
    }
}
