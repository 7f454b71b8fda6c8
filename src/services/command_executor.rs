//! Applies a [`Command`] to one partition's list and composes the reply.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Command, Reply, ShoppingList};
use crate::domain::ports::ListStore;
use crate::services::reply_text;

/// Executes commands against a [`ListStore`].
///
/// Holds no list state of its own: every call re-reads the store, so replies
/// are snapshots and concurrent commands on one partition may interleave.
#[derive(Clone)]
pub struct CommandExecutor {
    store: Arc<dyn ListStore>,
}

impl CommandExecutor {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self { store }
    }

    /// Execute a command for a partition.
    ///
    /// An unusable store degrades to the fixed unavailable reply. Any other
    /// store failure is returned to the caller.
    pub async fn execute(&self, command: &Command, partition: &str) -> DomainResult<Reply> {
        debug!(command = command.as_str(), partition, "Executing command");

        let result = match command {
            Command::Add(item) => self.add(partition, item).await,
            Command::Delete(item) => self.delete(partition, item).await,
            Command::List => self.list(partition).await,
            Command::MissingItem => Ok(reply_text::MISSING_ITEM_TEXT.to_string()),
            Command::Help => Ok(reply_text::HELP_TEXT.to_string()),
        };

        match result {
            Ok(text) => Ok(Reply::from(text)),
            Err(e) if e.is_store_unavailable() => {
                warn!(command = command.as_str(), error = %e, "List store unavailable");
                Ok(Reply::text(reply_text::STORE_UNAVAILABLE_TEXT))
            }
            Err(e) => Err(e),
        }
    }

    async fn add(&self, partition: &str, item: &str) -> DomainResult<String> {
        self.store.append(partition, item).await?;

        // The append is the durable effect; the listing is only for display.
        match self.snapshot(partition).await {
            Ok(list) => Ok(reply_text::added(item, &list)),
            Err(e) => {
                warn!(partition, error = %e, "Read-back after add failed");
                Ok(reply_text::added_without_listing(item))
            }
        }
    }

    async fn delete(&self, partition: &str, item: &str) -> DomainResult<String> {
        if !self.store.remove_first(partition, item).await? {
            return Ok(reply_text::not_found(item));
        }

        match self.snapshot(partition).await {
            Ok(list) => Ok(reply_text::deleted(item, &list)),
            Err(e) => {
                warn!(partition, error = %e, "Read-back after delete failed");
                Ok(reply_text::deleted_without_listing(item))
            }
        }
    }

    async fn list(&self, partition: &str) -> DomainResult<String> {
        Ok(self.snapshot(partition).await?.render())
    }

    async fn snapshot(&self, partition: &str) -> DomainResult<ShoppingList> {
        self.store.items(partition).await.map(ShoppingList::new)
    }
}
