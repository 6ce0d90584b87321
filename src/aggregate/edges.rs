//! Edge builder: derive edges from per-entity relationship lists
//!
//! Only relationships whose target is already a known node become edges;
//! edges never pull new nodes into the working set. Direction is ignored for
//! deduplication: `(a, b, T)` and `(b, a, T)` are one edge, and the first
//! occurrence wins.

use crate::graph::{EdgeKey, GraphEdge, NodeId};
use crate::source::{Relationship, SourceEntity};
use std::collections::HashSet;

/// Build the edge for one declared relationship
pub fn edge_from_relationship(source: &NodeId, relationship: &Relationship) -> GraphEdge {
    let mut edge = GraphEdge::new(
        source.clone(),
        relationship.target_id.clone(),
        relationship.relation_type.clone(),
    );
    if let Some(score) = relationship.score {
        edge = edge.with_score(score);
    }
    edge.author_position = relationship.author_position.clone();
    edge.is_corresponding = relationship.is_corresponding;
    edge.is_open_access = relationship.is_open_access;
    edge
}

/// Accumulates edges restricted to a known node set
#[derive(Debug)]
pub struct EdgeBuilder<'a> {
    known: &'a HashSet<NodeId>,
    seen: HashSet<EdgeKey>,
    edges: Vec<GraphEdge>,
}

impl<'a> EdgeBuilder<'a> {
    /// Create a builder over the given node ids
    pub fn new(known: &'a HashSet<NodeId>) -> Self {
        Self {
            known,
            seen: HashSet::new(),
            edges: Vec::new(),
        }
    }

    /// Add an edge unless an endpoint is unknown or the key, in either
    /// direction, was already added. Returns whether it was added.
    pub fn push(&mut self, edge: GraphEdge) -> bool {
        if !self.known.contains(&edge.source) || !self.known.contains(&edge.target) {
            return false;
        }
        let key = edge.key();
        if self.seen.contains(&key) || self.seen.contains(&key.reversed()) {
            return false;
        }
        self.seen.insert(key);
        self.edges.push(edge);
        true
    }

    /// Add the declared relationships of every entity, in order
    pub fn add_relationships(&mut self, entities: &[SourceEntity]) -> usize {
        let mut added = 0;
        for entity in entities {
            for relationship in &entity.relationships {
                if self.push(edge_from_relationship(&entity.entity_id, relationship)) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Append edges from a persisted relationship store, subject to the same
    /// endpoint and key rules. Returns how many were appended.
    pub fn overlay(&mut self, edges: impl IntoIterator<Item = GraphEdge>) -> usize {
        let mut added = 0;
        for edge in edges {
            if self.push(edge) {
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Finish and return the edges in insertion order
    pub fn finish(self) -> Vec<GraphEdge> {
        self.edges
    }
}

/// Edges for `entities`, restricted to `known` endpoints
pub fn build_edges(entities: &[SourceEntity], known: &HashSet<NodeId>) -> Vec<GraphEdge> {
    let mut builder = EdgeBuilder::new(known);
    builder.add_relationships(entities);
    builder.finish()
}
