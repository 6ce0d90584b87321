//! Node representation in the aggregated graph

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node
///
/// Serializes as a plain string. Equal to the entity id reported by sources,
/// which is stable across sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Entity classification
///
/// Serializes as a lowercase string. Unknown names survive a round trip
/// through `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Work,
    Author,
    Institution,
    Source,
    Topic,
    Funder,
    Publisher,
    Field,
    Domain,
    Custom(String),
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Work => "work",
            Self::Author => "author",
            Self::Institution => "institution",
            Self::Source => "source",
            Self::Topic => "topic",
            Self::Funder => "funder",
            Self::Publisher => "publisher",
            Self::Field => "field",
            Self::Domain => "domain",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "work" => Self::Work,
            "author" => Self::Author,
            "institution" => Self::Institution,
            "source" => Self::Source,
            "topic" => Self::Topic,
            "funder" => Self::Funder,
            "publisher" => Self::Publisher,
            "field" => Self::Field,
            "domain" => Self::Domain,
            _ => Self::Custom(s),
        }
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<EntityType> for String {
    fn from(t: EntityType) -> Self {
        match t {
            EntityType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed property values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<PropertyValue>),
    Object(HashMap<String, PropertyValue>),
}

/// Properties collection
pub type Properties = HashMap<String, PropertyValue>;

/// Attributes carried by an entity
///
/// Provenance and filtering fields are named so the deduplication priority
/// rule and the year filter never have to probe an open map. Everything else
/// a source wants to carry goes in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityAttributes {
    /// Record has been promoted into the persistent working set
    #[serde(default)]
    pub is_persistent_set_member: bool,
    /// Publication year, when the entity has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Opaque source payload
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: Properties,
}

impl EntityAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persistent_member(mut self) -> Self {
        self.is_persistent_set_member = true;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A deduplicated, positioned node in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Entity id
    pub id: NodeId,
    /// Entity classification
    pub entity_type: EntityType,
    /// Display name; equal to the id while unresolved
    pub label: String,
    /// Layout position, assigned once at creation
    pub x: f64,
    pub y: f64,
    /// Source the winning record came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Attributes of the winning record
    #[serde(default)]
    pub attributes: EntityAttributes,
}

impl GraphNode {
    /// Create a node at the origin with no attributes
    pub fn new(id: impl Into<NodeId>, entity_type: EntityType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type,
            label: label.into(),
            x: 0.0,
            y: 0.0,
            source_id: None,
            attributes: EntityAttributes::default(),
        }
    }

    /// Set the layout position
    pub fn at(mut self, position: Position) -> Self {
        self.x = position.x;
        self.y = position.y;
        self
    }

    /// Tag the node with its origin source
    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_attributes(mut self, attributes: EntityAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Publication year attribute, if any
    pub fn year(&self) -> Option<i32> {
        self.attributes.year
    }
}
