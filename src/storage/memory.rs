//! In-memory storage backends

use super::traits::{KeyValueStore, RelationshipStore, StorageResult};
use crate::graph::{GraphEdge, GraphNode};
use async_trait::async_trait;
use dashmap::DashMap;

/// Key/value store held in a concurrent map
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Relationship store over fixed node and edge lists
#[derive(Debug, Clone, Default)]
pub struct MemoryRelationshipStore {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl MemoryRelationshipStore {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn with_edges(edges: Vec<GraphEdge>) -> Self {
        Self::new(Vec::new(), edges)
    }
}

#[async_trait]
impl RelationshipStore for MemoryRelationshipStore {
    async fn get_all_nodes(&self) -> StorageResult<Vec<GraphNode>> {
        Ok(self.nodes.clone())
    }

    async fn get_all_edges(&self) -> StorageResult<Vec<GraphEdge>> {
        Ok(self.edges.clone())
    }
}
