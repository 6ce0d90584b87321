//! Edge representation with deterministic keys

use super::node::NodeId;
use serde::{Deserialize, Serialize};

/// Relationship classification
///
/// Serializes as a snake_case string; unknown names survive through `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationType {
    /// Work -> author
    Authorship,
    /// Author -> institution
    Affiliation,
    /// Work -> cited work
    References,
    /// Work -> venue
    PublishedIn,
    /// Work -> topic
    HasTopic,
    /// Work -> funder
    FundedBy,
    /// Venue -> publisher
    HostedBy,
    /// Topic -> field
    InField,
    /// Field -> domain
    InDomain,
    /// Work -> related work
    Related,
    Custom(String),
}

impl RelationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Authorship => "authorship",
            Self::Affiliation => "affiliation",
            Self::References => "references",
            Self::PublishedIn => "published_in",
            Self::HasTopic => "has_topic",
            Self::FundedBy => "funded_by",
            Self::HostedBy => "hosted_by",
            Self::InField => "in_field",
            Self::InDomain => "in_domain",
            Self::Related => "related",
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for RelationType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "authorship" => Self::Authorship,
            "affiliation" => Self::Affiliation,
            "references" => Self::References,
            "published_in" => Self::PublishedIn,
            "has_topic" => Self::HasTopic,
            "funded_by" => Self::FundedBy,
            "hosted_by" => Self::HostedBy,
            "in_field" => Self::InField,
            "in_domain" => Self::InDomain,
            "related" => Self::Related,
            _ => Self::Custom(s),
        }
    }
}

impl From<&str> for RelationType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RelationType> for String {
    fn from(r: RelationType) -> Self {
        match r {
            RelationType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural identity of an edge
///
/// Kept as a struct rather than the rendered `"{source}-{target}-{type}"`
/// string so ids containing `-` cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: RelationType,
}

impl EdgeKey {
    pub fn new(source: NodeId, target: NodeId, relation: RelationType) -> Self {
        Self {
            source,
            target,
            relation,
        }
    }

    /// The same relationship with endpoints swapped
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            relation: self.relation.clone(),
        }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.source, self.target, self.relation)
    }
}

/// A typed relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Rendered key, `"{source}-{target}-{relation_type}"`
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub relation_type: RelationType,
    /// Relevance score when present, else 1.0
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_corresponding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open_access: Option<bool>,
}

impl GraphEdge {
    /// Create an edge with weight 1.0 and no optional fields
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relation_type: RelationType,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let id = EdgeKey::new(source.clone(), target.clone(), relation_type.clone()).to_string();
        Self {
            id,
            source,
            target,
            relation_type,
            weight: 1.0,
            score: None,
            author_position: None,
            is_corresponding: None,
            is_open_access: None,
        }
    }

    /// Set the relevance score; the weight follows it
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self.weight = score;
        self
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(
            self.source.clone(),
            self.target.clone(),
            self.relation_type.clone(),
        )
    }

    /// Whether the edge touches the given node
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite `id`
    pub fn other_end(&self, id: &NodeId) -> &NodeId {
        if &self.source == id {
            &self.target
        } else {
            &self.source
        }
    }
}
