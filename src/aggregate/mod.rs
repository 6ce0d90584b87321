//! Aggregation core
//!
//! The load path runs collector → deduplicator → edge builder, and its
//! result replaces whatever graph the caller held. After that, the
//! incremental merger folds later discoveries into the same [`GraphState`]
//! without moving existing nodes.
//!
//! [`GraphState`]: crate::graph::GraphState

mod collector;
mod dedup;
mod edges;
mod merge;
mod pipeline;

pub use collector::{CollectionReport, EntityCollector};
pub use dedup::Deduplicator;
pub use edges::{build_edges, edge_from_relationship, EdgeBuilder};
pub use merge::{
    IncrementalMerger, LabelPolicy, MergeReport, NodeCandidate, DEFAULT_UNRESOLVED_PATTERN,
};
pub use pipeline::{AggregatedGraph, Aggregator};
