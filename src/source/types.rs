//! Types exchanged across the source contract

use crate::graph::{EntityAttributes, EntityType, NodeId, RelationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the persistent working-set source, whose records win deduplication
pub const WORKING_SET_SOURCE: &str = "graph:working-set";
/// Saved bookmarks
pub const BOOKMARKS_SOURCE: &str = "collection:bookmarks";
/// Browsing history
pub const HISTORY_SOURCE: &str = "collection:history";
/// Browser-local entity cache
pub const LOCAL_CACHE_SOURCE: &str = "cache:local";

/// The fixed set of system sources, in registration order
pub const SYSTEM_SOURCES: [&str; 4] = [
    WORKING_SET_SOURCE,
    BOOKMARKS_SOURCE,
    HISTORY_SOURCE,
    LOCAL_CACHE_SOURCE,
];

/// One relationship declared by an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub target_id: NodeId,
    pub target_type: EntityType,
    pub relation_type: RelationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_corresponding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open_access: Option<bool>,
}

impl Relationship {
    pub fn new(
        target_id: impl Into<NodeId>,
        target_type: EntityType,
        relation_type: RelationType,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            target_type,
            relation_type,
            score: None,
            author_position: None,
            is_corresponding: None,
            is_open_access: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_author_position(mut self, position: impl Into<String>) -> Self {
        self.author_position = Some(position.into());
        self
    }

    pub fn corresponding(mut self, is_corresponding: bool) -> Self {
        self.is_corresponding = Some(is_corresponding);
        self
    }

    pub fn open_access(mut self, is_open_access: bool) -> Self {
        self.is_open_access = Some(is_open_access);
        self
    }
}

/// One entity as reported by one source
///
/// The same `entity_id` may appear once per source that knows about it.
/// Records are produced fresh on every collection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntity {
    pub entity_id: NodeId,
    pub entity_type: EntityType,
    /// Display name; may equal `entity_id` when unresolved
    pub label: String,
    /// Origin source, e.g. `collection:bookmarks`
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub attributes: EntityAttributes,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl SourceEntity {
    /// Create an entity with no attributes or relationships
    pub fn new(
        entity_id: impl Into<NodeId>,
        entity_type: EntityType,
        label: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type,
            label: label.into(),
            source_id: source_id.into(),
            attributes: EntityAttributes::default(),
            relationships: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: EntityAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }
}

/// Bookkeeping for one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceState {
    pub source: String,
    pub enabled: bool,
    /// Entities reported on the last successful fetch or count probe
    pub entity_count: Option<usize>,
    /// Rendered failure from the last fetch or count probe
    pub error: Option<String>,
    /// When the source last settled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<DateTime<Utc>>,
}

impl SourceState {
    pub fn new(source: impl Into<String>, enabled: bool) -> Self {
        Self {
            source: source.into(),
            enabled,
            entity_count: None,
            error: None,
            collected_at: None,
        }
    }

    /// Record a successful settle
    pub fn succeeded(&mut self, count: usize) {
        self.entity_count = Some(count);
        self.error = None;
        self.collected_at = Some(Utc::now());
    }

    /// Record a failed settle
    pub fn failed(&mut self, error: impl std::fmt::Display) {
        self.entity_count = None;
        self.error = Some(error.to_string());
        self.collected_at = Some(Utc::now());
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Errors a source can report
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Fetch failed for {source_id}: {message}")]
    Fetch { source_id: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Source task aborted: {0}")]
    Aborted(String),
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;
