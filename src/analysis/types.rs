//! Result and error types shared by the analysis operations

use crate::graph::{GraphEdge, GraphNode, GraphState, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors raised by analysis operations
///
/// These indicate a caller mistake, not degraded data, so they propagate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid year range: {min} > {max}")]
    InvalidYearRange { min: i32, max: i32 },
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Which operation produced an [`AnalysisOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOperation {
    TrimLeafNodes,
    TrimRootNodes,
    TrimDegree1Nodes,
    RemoveIsolatedNodes,
    FilterByPublicationYear,
    ExtractEgoNetwork,
    LargestConnectedComponent,
}

impl AnalysisOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrimLeafNodes => "trim_leaf_nodes",
            Self::TrimRootNodes => "trim_root_nodes",
            Self::TrimDegree1Nodes => "trim_degree1_nodes",
            Self::RemoveIsolatedNodes => "remove_isolated_nodes",
            Self::FilterByPublicationYear => "filter_by_publication_year",
            Self::ExtractEgoNetwork => "extract_ego_network",
            Self::LargestConnectedComponent => "largest_connected_component",
        }
    }
}

impl fmt::Display for AnalysisOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subgraph left by a node-removing operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Nodes dropped relative to the input
    pub removed_count: usize,
    pub operation: AnalysisOperation,
}

impl AnalysisOutcome {
    /// Keep the nodes in `keep` (in input order) and every edge whose
    /// endpoints are both kept
    pub(crate) fn retain(
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        keep: &HashSet<&NodeId>,
        operation: AnalysisOperation,
    ) -> Self {
        let kept_nodes: Vec<GraphNode> = nodes
            .iter()
            .filter(|n| keep.contains(&n.id))
            .cloned()
            .collect();
        let kept_edges = edges
            .iter()
            .filter(|e| keep.contains(&e.source) && keep.contains(&e.target))
            .cloned()
            .collect();
        Self {
            removed_count: nodes.len() - kept_nodes.len(),
            nodes: kept_nodes,
            edges: kept_edges,
            operation,
        }
    }

    /// Replace the graph's contents with this outcome
    pub fn apply_to(self, graph: &mut GraphState) {
        tracing::debug!(
            operation = %self.operation,
            removed = self.removed_count,
            "applying analysis outcome"
        );
        graph.replace(self.nodes, self.edges);
    }
}
