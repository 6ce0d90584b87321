//! Ego-network extraction

use super::index::Adjacency;
use super::types::{AnalysisError, AnalysisOperation, AnalysisOutcome, AnalysisResult};
use crate::graph::{GraphEdge, GraphNode, NodeId};
use std::collections::HashSet;

/// Everything within `hops` edges of `center`, in either direction
///
/// Edges are kept when both endpoints fall inside the radius, so edges
/// between two nodes at the rim survive too. `hops == 0` keeps only the
/// center.
pub fn extract_ego_network(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    center: &NodeId,
    hops: usize,
) -> AnalysisResult<AnalysisOutcome> {
    let adj = Adjacency::build(nodes, edges);
    if !adj.contains(center) {
        return Err(AnalysisError::NodeNotFound(center.clone()));
    }

    // Level-by-level BFS
    let mut visited: HashSet<&NodeId> = HashSet::new();
    let mut current_level: Vec<&NodeId> = Vec::new();
    if let Some(node) = nodes.iter().find(|n| &n.id == center) {
        visited.insert(&node.id);
        current_level.push(&node.id);
    }

    for _depth in 0..hops {
        if current_level.is_empty() {
            break;
        }
        let mut next_level = Vec::new();
        for id in &current_level {
            for neighbor in adj.neighbors(id) {
                if visited.insert(*neighbor) {
                    next_level.push(*neighbor);
                }
            }
        }
        current_level = next_level;
    }

    Ok(AnalysisOutcome::retain(
        nodes,
        edges,
        &visited,
        AnalysisOperation::ExtractEgoNetwork,
    ))
}
