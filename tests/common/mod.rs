//! Shared test utilities and repository doubles.

#![allow(dead_code, unused_imports)]

pub mod test_repository;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use inventory::config::ControllerConfig;
use inventory::data::{Item, ItemsRepository, OfflineItemsRepository};
use inventory::ui::details::DetailsOptions;
use inventory::ui::mvi::SharingPolicy;
use tempfile::TempDir;

pub use test_repository::TestRepository;

/// Game, Pen and TV with ids 1, 2 and 3.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new("Game", 100.0, 20).with_id(1),
        Item::new("Pen", 200.0, 30).with_id(2),
        Item::new("TV", 300.0, 50).with_id(3),
    ]
}

pub fn sample_repository() -> Arc<dyn ItemsRepository> {
    Arc::new(OfflineItemsRepository::with_items(sample_items()).expect("valid sample items"))
}

pub fn short_grace() -> SharingPolicy {
    SharingPolicy::while_subscribed(Duration::from_millis(50))
}

pub fn fast_options() -> DetailsOptions {
    DetailsOptions {
        sharing: short_grace(),
        not_found_timeout: Duration::from_millis(200),
    }
}

pub fn fast_controller_config() -> ControllerConfig {
    ControllerConfig {
        subscription_grace_ms: 50,
        not_found_timeout_ms: 200,
    }
}

pub fn ids(items: &[Item]) -> Vec<i32> {
    items.iter().map(|item| item.id).collect()
}

/// Write `content` to a file inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}
