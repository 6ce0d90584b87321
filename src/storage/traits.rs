//! Storage trait definitions

use crate::graph::{GraphEdge, GraphNode};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value persistence
///
/// Implementations must be thread-safe (Send + Sync).
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key was never written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key. Returns whether it existed.
    fn remove(&self, key: &str) -> StorageResult<bool>;
}

/// Persisted relationship store used as an edge overlay
///
/// Only contributes edges between nodes already in the working set; its
/// nodes are never added by aggregation.
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    async fn get_all_nodes(&self) -> StorageResult<Vec<GraphNode>>;

    async fn get_all_edges(&self) -> StorageResult<Vec<GraphEdge>>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
