//! Repository double with switchable failures and write latency.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use inventory::data::{
    Item, ItemStream, ItemsRepository, ItemsStream, OfflineItemsRepository, RepositoryError,
    RepositoryResult,
};

/// Wraps the offline repository, counting writes and optionally failing
/// or delaying them.
pub struct TestRepository {
    inner: OfflineItemsRepository,
    fail_writes: AtomicBool,
    write_delay: Mutex<Duration>,
    updates: AtomicUsize,
}

impl TestRepository {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            inner: OfflineItemsRepository::with_items(items).expect("valid items"),
            fail_writes: AtomicBool::new(false),
            write_delay: Mutex::new(Duration::ZERO),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock() = delay;
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn current(&self, id: i32) -> Option<Item> {
        self.inner.stream_item(id).borrow().clone()
    }

    async fn before_write(&self) -> RepositoryResult<()> {
        let delay = *self.write_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable {
                message: "storage offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ItemsRepository for TestRepository {
    fn stream_all_items(&self) -> ItemsStream {
        self.inner.stream_all_items()
    }

    fn stream_item(&self, id: i32) -> ItemStream {
        self.inner.stream_item(id)
    }

    async fn insert_item(&self, item: Item) -> RepositoryResult<Item> {
        self.before_write().await?;
        self.inner.insert_item(item).await
    }

    async fn update_item(&self, item: Item) -> RepositoryResult<()> {
        self.before_write().await?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_item(item).await
    }

    async fn delete_item(&self, item: Item) -> RepositoryResult<()> {
        self.before_write().await?;
        self.inner.delete_item(item).await
    }
}
