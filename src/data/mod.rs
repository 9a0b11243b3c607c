//! Item records and the repository that stores them.

mod error;
mod item;
mod offline;
mod repository;

pub use error::{RepositoryError, RepositoryResult, SeedError};
pub use item::Item;
pub use offline::OfflineItemsRepository;
pub use repository::{ItemStream, ItemsRepository, ItemsStream};
