//! Process-local implementation of the ListStore.
//!
//! Each partition owns its own lock; the outer map lock is only held long
//! enough to look up or insert a partition, so operations on different
//! partitions never wait on each other. Contents are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::errors::DomainResult;
use crate::domain::ports::ListStore;

type Partition = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Default)]
pub struct InMemoryListStore {
    partitions: RwLock<HashMap<String, Partition>>,
}

impl InMemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn existing(&self, partition: &str) -> Option<Partition> {
        self.partitions.read().await.get(partition).cloned()
    }

    async fn get_or_create(&self, partition: &str) -> Partition {
        if let Some(existing) = self.existing(partition).await {
            return existing;
        }
        self.partitions
            .write()
            .await
            .entry(partition.to_string())
            .or_default()
            .clone()
    }
}

#[async_trait]
impl ListStore for InMemoryListStore {
    async fn append(&self, partition: &str, item: &str) -> DomainResult<()> {
        let list = self.get_or_create(partition).await;
        list.lock().await.push(item.to_string());
        Ok(())
    }

    async fn items(&self, partition: &str) -> DomainResult<Vec<String>> {
        match self.existing(partition).await {
            Some(list) => Ok(list.lock().await.clone()),
            None => Ok(Vec::new()),
        }
    }

    async fn remove_first(&self, partition: &str, item: &str) -> DomainResult<bool> {
        let Some(list) = self.existing(partition).await else {
            return Ok(false);
        };
        let mut items = list.lock().await;
        match items.iter().position(|existing| existing == item) {
            Some(index) => {
                items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
