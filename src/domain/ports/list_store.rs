use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Repository trait for per-partition shopping list rows
///
/// A partition is the platform identifier of a user, group or room. Partitions
/// are independent: implementations must not serialise operations on one
/// partition behind another.
///
/// There is no cross-call locking. A caller that reads after writing sees a
/// snapshot that other writers may already have changed.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Append an item to the end of the partition's list
    ///
    /// Creates the list implicitly on first use.
    async fn append(&self, partition: &str, item: &str) -> DomainResult<()>;

    /// Items of a partition in insertion order
    ///
    /// An unknown partition yields an empty list, never an error.
    async fn items(&self, partition: &str) -> DomainResult<Vec<String>>;

    /// Remove the first item exactly equal to `item`
    ///
    /// Find and remove happen as one step. Returns `false` when no item
    /// matched, in which case nothing changed.
    async fn remove_first(&self, partition: &str, item: &str) -> DomainResult<bool>;
}
