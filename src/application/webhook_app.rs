//! Assembles the webhook service from configuration.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::adapters::http::WebhookServer;
use crate::adapters::line::LineReplyClient;
use crate::adapters::memory::InMemoryListStore;
use crate::adapters::sqlite::{open_list_store, ConnectionError, DatabaseError, PoolConfig, SqliteListStore};
use crate::adapters::unavailable::UnavailableListStore;
use crate::domain::models::{Config, StoreBackend, StoreConfig};
use crate::domain::ports::{ListStore, ReplySender};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{CommandExecutor, EventDispatcher, WebhookGate};

/// Build the configured list store.
///
/// A durable store that cannot be opened is replaced by
/// [`UnavailableListStore`]; the service still starts and answers store
/// commands with the unavailable reply.
pub async fn build_list_store(config: &StoreConfig) -> Arc<dyn ListStore> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory list store; lists are lost on restart");
            Arc::new(InMemoryListStore::new())
        }
        StoreBackend::Sqlite => match open_sqlite(config).await {
            Ok(store) => {
                info!("Using sqlite list store");
                Arc::new(store)
            }
            Err(e) => {
                warn!(error = %e, "List store unavailable, store commands will be refused");
                Arc::new(UnavailableListStore::new(e.to_string()))
            }
        },
    }
}

async fn open_sqlite(config: &StoreConfig) -> Result<SqliteListStore, DatabaseError> {
    let url = config
        .database_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConnectionError::MissingDatabaseUrl)?;
    open_list_store(url, PoolConfig::from(config)).await
}

/// Wire a server around an already built store and reply sender.
pub fn assemble(config: &Config, store: Arc<dyn ListStore>, sender: Arc<dyn ReplySender>) -> WebhookServer {
    let dispatcher = EventDispatcher::new(CommandExecutor::new(store), sender, &config.dispatch);
    let gate = WebhookGate::new(
        config.line.channel_secret.clone(),
        config.server.non_post_response,
    );
    WebhookServer::new(config.server.clone(), gate, dispatcher)
}

/// Build the production server: credentials checked, store opened, reply
/// client pointed at the platform.
pub async fn build_server(config: &Config) -> Result<WebhookServer> {
    ConfigLoader::require_credentials(&config.line)?;

    let store = build_list_store(&config.store).await;
    let sender = LineReplyClient::new(&config.line).context("Failed to create reply client")?;

    Ok(assemble(config, store, Arc::new(sender)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[tokio::test]
    async fn test_memory_backend() {
        let store = build_list_store(&StoreConfig::default()).await;
        store.append("U1", "卵").await.unwrap();
        assert_eq!(store.items("U1").await.unwrap(), vec!["卵"]);
    }

    #[tokio::test]
    async fn test_sqlite_without_url_degrades() {
        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            database_url: None,
            ..StoreConfig::default()
        };
        let store = build_list_store(&config).await;
        assert!(matches!(
            store.items("U1").await.unwrap_err(),
            DomainError::StoreUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_sqlite_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            database_url: Some(format!("sqlite:{}", dir.path().join("list.db").display())),
            ..StoreConfig::default()
        };
        let store = build_list_store(&config).await;
        store.append("U1", "米").await.unwrap();
        assert!(store.remove_first("U1", "米").await.unwrap());
    }

    #[tokio::test]
    async fn test_build_server_requires_credentials() {
        let err = build_server(&Config::default()).await.err().unwrap();
        assert!(err.to_string().contains("LINE_CHANNEL_SECRET"));
    }
}
