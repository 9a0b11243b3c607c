//! In-memory repository backed by `watch` channels.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;

use super::error::{RepositoryError, RepositoryResult, SeedError};
use super::item::Item;
use super::repository::{ItemStream, ItemsRepository, ItemsStream};

/// Repository that keeps every item in process memory.
///
/// Each write updates the table and publishes to the collection channel and
/// the affected per-item channel while holding the table lock, so streams
/// observe writes in commit order.
pub struct OfflineItemsRepository {
    inner: Mutex<Table>,
    all_items: watch::Sender<Vec<Item>>,
}

struct Table {
    items: BTreeMap<i32, Item>,
    /// `None` once `i32::MAX` has been handed out.
    next_id: Option<i32>,
    per_item: HashMap<i32, watch::Sender<Option<Item>>>,
}

impl Table {
    fn sorted(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        items
    }

    fn publish_item(&mut self, id: i32) {
        let value = self.items.get(&id).cloned();
        if let Some(tx) = self.per_item.get(&id) {
            tx.send_replace(value);
        }
        // Drop channels nobody listens to anymore.
        self.per_item.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl OfflineItemsRepository {
    pub fn new() -> Self {
        let (all_items, _) = watch::channel(Vec::new());
        Self {
            inner: Mutex::new(Table {
                items: BTreeMap::new(),
                next_id: Some(1),
                per_item: HashMap::new(),
            }),
            all_items,
        }
    }

    /// Build a repository holding `items`. Items with id `0` get fresh ids.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> RepositoryResult<Self> {
        let repo = Self::new();
        {
            let mut table = repo.inner.lock();
            for item in items {
                Self::insert_locked(&mut table, item)?;
            }
            repo.all_items.send_replace(table.sorted());
        }
        Ok(repo)
    }

    /// Build a repository from a JSON array of items.
    pub fn from_seed_file(path: &Path) -> RepositoryResult<Self> {
        let seed_error = |source: SeedError| RepositoryError::Seed {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(|e| seed_error(e.into()))?;
        let items: Vec<Item> = serde_json::from_str(&content).map_err(|e| seed_error(e.into()))?;
        tracing::info!(path = %path.display(), count = items.len(), "Seeding repository");
        Self::with_items(items)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    fn insert_locked(table: &mut Table, mut item: Item) -> RepositoryResult<Item> {
        item.validate()?;
        if item.id == 0 {
            item.id = table.next_id.ok_or_else(|| RepositoryError::Invalid {
                message: "no item ids left to assign".to_string(),
            })?;
        } else if table.items.contains_key(&item.id) {
            return Err(RepositoryError::Conflict { id: item.id });
        }
        table.next_id = match (table.next_id, item.id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
        table.items.insert(item.id, item.clone());
        Ok(item)
    }

    fn commit(&self, table: &mut Table, id: i32) {
        table.publish_item(id);
        self.all_items.send_replace(table.sorted());
    }
}

impl Default for OfflineItemsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemsRepository for OfflineItemsRepository {
    fn stream_all_items(&self) -> ItemsStream {
        self.all_items.subscribe()
    }

    fn stream_item(&self, id: i32) -> ItemStream {
        let mut table = self.inner.lock();
        let current = table.items.get(&id).cloned();
        table
            .per_item
            .entry(id)
            .or_insert_with(|| watch::channel(current).0)
            .subscribe()
    }

    async fn insert_item(&self, item: Item) -> RepositoryResult<Item> {
        let mut table = self.inner.lock();
        let stored = Self::insert_locked(&mut table, item)?;
        self.commit(&mut table, stored.id);
        tracing::debug!(id = stored.id, name = %stored.name, "Item inserted");
        Ok(stored)
    }

    async fn update_item(&self, item: Item) -> RepositoryResult<()> {
        item.validate()?;
        let mut table = self.inner.lock();
        let id = item.id;
        match table.items.get_mut(&id) {
            Some(slot) => *slot = item,
            None => return Err(RepositoryError::NotFound { id }),
        }
        self.commit(&mut table, id);
        tracing::debug!(id, "Item updated");
        Ok(())
    }

    async fn delete_item(&self, item: Item) -> RepositoryResult<()> {
        let mut table = self.inner.lock();
        if table.items.remove(&item.id).is_none() {
            return Err(RepositoryError::NotFound { id: item.id });
        }
        self.commit(&mut table, item.id);
        tracing::debug!(id = item.id, "Item deleted");
        Ok(())
    }
}
