//! Null list store used when the configured backend could not be opened.
//!
//! Every call fails with `StoreUnavailable` so store commands degrade to a
//! fixed reply while help and parsing keep working.

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::ListStore;

#[derive(Debug, Clone)]
pub struct UnavailableListStore {
    reason: String,
}

impl UnavailableListStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn error(&self) -> DomainError {
        DomainError::StoreUnavailable(self.reason.clone())
    }
}

#[async_trait]
impl ListStore for UnavailableListStore {
    async fn append(&self, _partition: &str, _item: &str) -> DomainResult<()> {
        Err(self.error())
    }

    async fn items(&self, _partition: &str) -> DomainResult<Vec<String>> {
        Err(self.error())
    }

    async fn remove_first(&self, _partition: &str, _item: &str) -> DomainResult<bool> {
        Err(self.error())
    }
}
