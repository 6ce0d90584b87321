//! Undirected adjacency view over a node/edge slice

use crate::graph::{GraphEdge, GraphNode, NodeId};
use std::collections::HashMap;

/// Neighbor lists and degrees, ignoring edge direction
///
/// Edges with an endpoint outside the node list are ignored. A self-loop
/// counts twice towards its node's degree.
pub(crate) struct Adjacency<'a> {
    neighbors: HashMap<&'a NodeId, Vec<&'a NodeId>>,
    degree: HashMap<&'a NodeId, usize>,
}

impl<'a> Adjacency<'a> {
    pub(crate) fn build(nodes: &'a [GraphNode], edges: &'a [GraphEdge]) -> Self {
        let mut neighbors: HashMap<&NodeId, Vec<&NodeId>> =
            nodes.iter().map(|n| (&n.id, Vec::new())).collect();
        let mut degree: HashMap<&NodeId, usize> = nodes.iter().map(|n| (&n.id, 0)).collect();

        for edge in edges {
            if !(neighbors.contains_key(&edge.source) && neighbors.contains_key(&edge.target)) {
                continue;
            }
            for (from, to) in [(&edge.source, &edge.target), (&edge.target, &edge.source)] {
                if let Some(list) = neighbors.get_mut(from) {
                    list.push(to);
                }
                if let Some(d) = degree.get_mut(from) {
                    *d += 1;
                }
            }
        }

        Self { neighbors, degree }
    }

    pub(crate) fn degree(&self, id: &NodeId) -> usize {
        self.degree.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn neighbors(&self, id: &NodeId) -> &[&'a NodeId] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn contains(&self, id: &NodeId) -> bool {
        self.neighbors.contains_key(id)
    }

    pub(crate) fn into_degrees(self) -> HashMap<&'a NodeId, usize> {
        self.degree
    }
}
