//! Summary statistics

use super::components::find_connected_components;
use crate::graph::{GraphEdge, GraphNode, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Counts describing one graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub connected_components: usize,
    pub largest_component_size: usize,
    pub nodes_by_type: BTreeMap<String, usize>,
    pub edges_by_type: BTreeMap<String, usize>,
}

/// Compute [`GraphStats`]; an empty graph yields all zeros
///
/// Edges with an endpoint outside `nodes` are not counted.
pub fn get_graph_stats(nodes: &[GraphNode], edges: &[GraphEdge]) -> GraphStats {
    let known: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
    let counted: Vec<&GraphEdge> = edges
        .iter()
        .filter(|e| known.contains(&e.source) && known.contains(&e.target))
        .collect();
    let mut stats = GraphStats {
        total_nodes: nodes.len(),
        total_edges: counted.len(),
        ..Default::default()
    };

    for node in nodes {
        *stats
            .nodes_by_type
            .entry(node.entity_type.as_str().to_string())
            .or_default() += 1;
    }
    for edge in &counted {
        *stats
            .edges_by_type
            .entry(edge.relation_type.as_str().to_string())
            .or_default() += 1;
    }

    let components = find_connected_components(nodes, edges);
    stats.connected_components = components.len();
    stats.largest_component_size = components.iter().map(Vec::len).max().unwrap_or(0);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EntityType, RelationType};

    #[test]
    fn test_empty_graph_stats() {
        assert_eq!(get_graph_stats(&[], &[]), GraphStats::default());
    }

    #[test]
    fn test_counts_by_type() {
        let nodes = vec![
            GraphNode::new("W1", EntityType::Work, "Paper"),
            GraphNode::new("W2", EntityType::Work, "Other paper"),
            GraphNode::new("A1", EntityType::Author, "Ada"),
        ];
        let edges = vec![
            GraphEdge::new("W1", "A1", RelationType::Authorship),
            GraphEdge::new("W1", "W2", RelationType::References),
            GraphEdge::new("W2", "A1", RelationType::Authorship),
        ];

        let stats = get_graph_stats(&nodes, &edges);

        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.total_edges, 3);
        assert_eq!(stats.connected_components, 1);
        assert_eq!(stats.largest_component_size, 3);
        assert_eq!(stats.nodes_by_type["work"], 2);
        assert_eq!(stats.nodes_by_type["author"], 1);
        assert_eq!(stats.edges_by_type["authorship"], 2);
        assert_eq!(stats.edges_by_type["references"], 1);
    }

    #[test]
    fn test_dangling_edges_are_not_counted() {
        let nodes = vec![
            GraphNode::new("W1", EntityType::Work, "Paper"),
            GraphNode::new("W2", EntityType::Work, "Other paper"),
        ];
        let edges = vec![
            GraphEdge::new("W1", "W2", RelationType::References),
            GraphEdge::new("W1", "A404", RelationType::Authorship),
        ];

        let stats = get_graph_stats(&nodes, &edges);

        assert_eq!(stats.total_edges, 1);
        assert_eq!(stats.edges_by_type.get("authorship"), None);
        assert_eq!(stats.edges_by_type["references"], 1);
        assert_eq!(stats.connected_components, 1);
    }

    #[test]
    fn test_stats_serialize_with_snake_case_keys() {
        let json = serde_json::to_value(GraphStats::default()).unwrap();
        assert_eq!(json["largest_component_size"], 0);
        assert!(json["nodes_by_type"].as_object().unwrap().is_empty());
    }
}
