use async_trait::async_trait;
use tokio::sync::watch;

use super::error::RepositoryResult;
use super::item::Item;

/// Live view of the whole collection, ordered by name.
pub type ItemsStream = watch::Receiver<Vec<Item>>;

/// Live view of one item; `None` while the id is not stored.
pub type ItemStream = watch::Receiver<Option<Item>>;

/// Data access for [`Item`] records.
///
/// Streams always hold the latest value and notify on every committed write.
/// The repository owns serialization of conflicting writes; callers never
/// touch storage directly.
#[async_trait]
pub trait ItemsRepository: Send + Sync {
    /// Subscribe to the full collection.
    fn stream_all_items(&self) -> ItemsStream;

    /// Subscribe to a single item by id.
    fn stream_item(&self, id: i32) -> ItemStream;

    /// Store a new item. An `id` of `0` lets storage assign one.
    /// Returns the stored item.
    async fn insert_item(&self, item: Item) -> RepositoryResult<Item>;

    /// Replace an existing item. `NotFound` if the id is not stored.
    async fn update_item(&self, item: Item) -> RepositoryResult<()>;

    /// Remove an item. `NotFound` if the id is not stored.
    async fn delete_item(&self, item: Item) -> RepositoryResult<()>;
}
