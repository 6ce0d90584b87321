//! Incremental merger: fold later discoveries into an existing graph
//!
//! All three operations are idempotent and never move an existing node.
//! Edges keep the working-set invariant: an edge whose endpoint is not a
//! node in the graph is rejected rather than creating the node.

use crate::graph::{
    EdgeInsert, EntityAttributes, EntityType, GraphEdge, GraphNode, GraphState, NodeId,
};
use crate::layout::Layout;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default shape of an unresolved label: an uppercase letter then digits
pub const DEFAULT_UNRESOLVED_PATTERN: &str = r"^[A-Z]\d+$";

/// Decides whether a label is still a bare identifier
#[derive(Debug, Clone)]
pub struct LabelPolicy {
    unresolved: Regex,
}

impl LabelPolicy {
    pub fn new(pattern: &str) -> Result<Self, regex_lite::Error> {
        Ok(Self {
            unresolved: Regex::new(pattern)?,
        })
    }

    pub fn is_unresolved(&self, label: &str) -> bool {
        self.unresolved.is_match(label)
    }

    /// Whether `candidate` should replace `existing`
    pub fn is_upgrade(&self, existing: &str, candidate: &str) -> bool {
        self.is_unresolved(existing) && !self.is_unresolved(candidate)
    }
}

/// A node discovered after the initial load, not yet positioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCandidate {
    pub id: NodeId,
    pub entity_type: EntityType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default)]
    pub attributes: EntityAttributes,
}

impl NodeCandidate {
    pub fn new(id: impl Into<NodeId>, entity_type: EntityType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type,
            label: label.into(),
            source_id: None,
            attributes: EntityAttributes::default(),
        }
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_attributes(mut self, attributes: EntityAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    fn into_node(self, layout: &dyn Layout, index: usize) -> GraphNode {
        let position = layout.place(&self.id, index);
        GraphNode {
            id: self.id,
            entity_type: self.entity_type,
            label: self.label,
            x: position.x,
            y: position.y,
            source_id: self.source_id,
            attributes: self.attributes,
        }
    }
}

/// What a merge call changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub nodes_added: usize,
    pub labels_updated: usize,
    pub edges_added: usize,
    /// Edges dropped because an endpoint is not in the graph
    pub edges_rejected: usize,
}

impl MergeReport {
    pub fn is_noop(&self) -> bool {
        self.nodes_added == 0 && self.labels_updated == 0 && self.edges_added == 0
    }
}

/// Applies additive updates to a [`GraphState`]
pub struct IncrementalMerger<'a> {
    layout: &'a dyn Layout,
    labels: &'a LabelPolicy,
}

impl<'a> IncrementalMerger<'a> {
    pub fn new(layout: &'a dyn Layout, labels: &'a LabelPolicy) -> Self {
        Self { layout, labels }
    }

    /// Insert unseen nodes at fresh positions, upgrade unresolved labels of
    /// known nodes, then insert unseen edges
    ///
    /// New nodes are placed as if appended after the nodes already loaded.
    pub fn add_nodes_and_edges(
        &self,
        graph: &mut GraphState,
        nodes: Vec<NodeCandidate>,
        edges: Vec<GraphEdge>,
    ) -> MergeReport {
        let mut report = MergeReport::default();

        for candidate in nodes {
            match graph.get_node_mut(&candidate.id) {
                Some(existing) => {
                    if self.labels.is_upgrade(&existing.label, &candidate.label) {
                        existing.label = candidate.label;
                        report.labels_updated += 1;
                    }
                }
                None => {
                    let node = candidate.into_node(self.layout, graph.node_count());
                    graph.add_node(node);
                    report.nodes_added += 1;
                }
            }
        }

        self.insert_edges(graph, edges, &mut report);
        report
    }

    /// Overwrite labels for the given ids; ids not in the graph are ignored
    pub fn update_node_labels(
        &self,
        graph: &mut GraphState,
        updates: &HashMap<NodeId, String>,
    ) -> MergeReport {
        let mut report = MergeReport::default();
        for (id, label) in updates {
            if let Some(node) = graph.get_node_mut(id) {
                if &node.label != label {
                    node.label = label.clone();
                    report.labels_updated += 1;
                }
            }
        }
        report
    }

    /// Insert unseen edges; never creates nodes
    pub fn add_discovered_edges(
        &self,
        graph: &mut GraphState,
        edges: Vec<GraphEdge>,
    ) -> MergeReport {
        let mut report = MergeReport::default();
        self.insert_edges(graph, edges, &mut report);
        report
    }

    fn insert_edges(
        &self,
        graph: &mut GraphState,
        edges: Vec<GraphEdge>,
        report: &mut MergeReport,
    ) {
        for edge in edges {
            match graph.add_edge(edge) {
                EdgeInsert::Added => report.edges_added += 1,
                EdgeInsert::Duplicate => {}
                EdgeInsert::MissingEndpoint(id) => {
                    tracing::debug!(
                        missing = %id,
                        "dropping discovered edge with unknown endpoint"
                    );
                    report.edges_rejected += 1;
                }
            }
        }
    }
}
