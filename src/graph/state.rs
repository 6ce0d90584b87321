//! GraphState: the caller-owned node/edge working set

use super::edge::{EdgeKey, GraphEdge};
use super::node::{GraphNode, NodeId};
use crate::analysis::AnalysisOutcome;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Outcome of inserting an edge into a [`GraphState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeInsert {
    /// Edge was new and has been stored
    Added,
    /// The key or its reverse is already present
    Duplicate,
    /// An endpoint is not a node in the working set
    MissingEndpoint(NodeId),
}

/// Plain serialized form of a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// The aggregated graph for one session
///
/// Nodes and edges keep insertion order so every operation over them is
/// deterministic. Two invariants hold after every mutation:
///
/// - every edge has both endpoints in `nodes`
/// - no two edges share a key, in either direction
///
/// There is no shared instance; callers own the value and pass it to the
/// merge and analysis operations explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct GraphState {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    node_index: HashMap<NodeId, usize>,
    edge_keys: HashSet<EdgeKey>,
}

impl GraphState {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from parts, dropping duplicate nodes, duplicate edges,
    /// and edges with a missing endpoint
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let mut state = Self::new();
        for node in nodes {
            state.add_node(node);
        }
        for edge in edges {
            state.add_edge(edge);
        }
        state
    }

    /// Add a node. Returns false (and leaves the graph untouched) if the id
    /// is already present.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        if self.node_index.contains_key(&node.id) {
            return false;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Add an edge if both endpoints exist and neither its key nor the
    /// reversed key is already present
    pub fn add_edge(&mut self, edge: GraphEdge) -> EdgeInsert {
        for endpoint in [&edge.source, &edge.target] {
            if !self.node_index.contains_key(endpoint) {
                return EdgeInsert::MissingEndpoint(endpoint.clone());
            }
        }
        let key = edge.key();
        if self.contains_edge(&key) {
            return EdgeInsert::Duplicate;
        }
        self.edge_keys.insert(key);
        self.edges.push(edge);
        EdgeInsert::Added
    }

    /// Whether an edge with this key, in either direction, is present
    pub fn contains_edge(&self, key: &EdgeKey) -> bool {
        self.edge_keys.contains(key) || self.edge_keys.contains(&key.reversed())
    }

    /// Replace the whole working set
    pub fn replace(&mut self, nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) {
        *self = Self::from_parts(nodes, edges);
    }

    /// Swap in the subgraph left by an analysis operation
    pub fn apply(&mut self, outcome: AnalysisOutcome) {
        outcome.apply_to(self);
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Get a mutable reference to a node
    ///
    /// The id must not be changed through this reference.
    pub fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut GraphNode> {
        match self.node_index.get(id) {
            Some(&i) => self.nodes.get_mut(i),
            None => None,
        }
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Set of node ids currently in the working set
    pub fn node_ids(&self) -> HashSet<NodeId> {
        self.node_index.keys().cloned().collect()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clone the contents into their serialized form
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

impl From<GraphSnapshot> for GraphState {
    fn from(snapshot: GraphSnapshot) -> Self {
        Self::from_parts(snapshot.nodes, snapshot.edges)
    }
}

impl From<GraphState> for GraphSnapshot {
    fn from(state: GraphState) -> Self {
        Self {
            nodes: state.nodes,
            edges: state.edges,
        }
    }
}
