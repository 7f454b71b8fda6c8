//! SQLite adapters for the durable list store.

pub mod connection;
pub mod list_store;
pub mod migrations;

pub use connection::{create_pool, create_test_pool, ConnectionError, PoolConfig};
pub use list_store::SqliteListStore;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};

use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

pub async fn initialize_database(database_url: &str, config: PoolConfig) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, config).await?;
    Migrator::new(pool.clone()).run(&all_embedded_migrations()).await?;
    Ok(pool)
}

/// Open a migrated pool and wrap it in a list store.
pub async fn open_list_store(database_url: &str, config: PoolConfig) -> Result<SqliteListStore, DatabaseError> {
    Ok(SqliteListStore::new(initialize_database(database_url, config).await?))
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    Migrator::new(pool.clone()).run(&all_embedded_migrations()).await?;
    Ok(pool)
}
