use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`ItemsRepository`](super::ItemsRepository) writes.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Item {id} not found")]
    NotFound { id: i32 },

    #[error("Item {id} already exists")]
    Conflict { id: i32 },

    #[error("Invalid item: {message}")]
    Invalid { message: String },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("Failed to load seed file '{path}': {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: SeedError,
    },
}

/// Reasons a seed file could not be loaded.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
