//! Mosaic: multi-source entity aggregation
//!
//! Collects entities from independent sources (saved collections, history,
//! local caches, a persistent working set), resolves duplicates with a
//! deterministic priority rule, and builds one relationship graph restricted
//! to the entities actually present.
//!
//! # Core Concepts
//!
//! - **Sources**: polled providers of [`SourceEntity`] records
//! - **Aggregator**: collect → dedupe → build edges, superseding the
//!   previous graph on every load
//! - **Merger**: additive updates that never move existing nodes
//! - **Analysis**: pure functions over node/edge slices
//!
//! # Example
//!
//! ```
//! use mosaic::{Aggregator, MemoryKeyValueStore, MosaicConfig};
//! use std::sync::Arc;
//!
//! let aggregator = Aggregator::new(MosaicConfig::default(), Arc::new(MemoryKeyValueStore::new()))
//!     .expect("default config is valid");
//! assert!(aggregator.registry().is_empty());
//! ```

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod graph;
pub mod layout;
pub mod source;
pub mod storage;

pub use aggregate::{AggregatedGraph, Aggregator, IncrementalMerger, MergeReport, NodeCandidate};
pub use analysis::{AnalysisError, AnalysisOutcome, GraphStats};
pub use config::{ConfigError, MosaicConfig};
pub use graph::{
    EntityAttributes, EntityType, GraphEdge, GraphNode, GraphState, NodeId, Position,
    RelationType,
};
pub use layout::{FixedLayout, GridLayout, Layout, RandomLayout};
pub use source::{
    JsonFileSource, MemorySource, Relationship, Source, SourceCatalog, SourceEntity, SourceError,
    SourceState,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, MemoryRelationshipStore, OpenStore, RelationshipStore,
    SqliteStore, StorageError, StorageResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
