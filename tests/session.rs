//! Incremental merges and analysis over a loaded session graph

mod common;

use common::{work, CorpusBuilder};
use mosaic::analysis::{
    extract_ego_network, find_connected_components, get_graph_stats,
    get_largest_connected_component, shortest_path, trim_leaf_nodes,
};
use mosaic::source::{HISTORY_SOURCE, LOCAL_CACHE_SOURCE, WORKING_SET_SOURCE};
use mosaic::{EntityType, GraphEdge, NodeCandidate, NodeId, Position, RelationType};
use std::collections::HashMap;

async fn loaded_all() -> (common::Fixture, mosaic::AggregatedGraph) {
    let fixture = CorpusBuilder::new().build();
    for id in [WORKING_SET_SOURCE, HISTORY_SOURCE, LOCAL_CACHE_SOURCE] {
        fixture.aggregator.set_enabled(id, true);
    }
    let result = fixture.aggregator.load().await;
    (fixture, result)
}

#[tokio::test]
async fn test_expansion_merge_is_idempotent() {
    let fixture = CorpusBuilder::new().build();
    let mut result = fixture.aggregator.load().await;
    let merger = fixture.aggregator.merger();

    let nodes = vec![
        NodeCandidate::new("W1", EntityType::Work, "Graph aggregation in practice"),
        NodeCandidate::new("W5", EntityType::Work, "Expanded neighbor").with_source("expansion"),
    ];
    let edges = vec![
        GraphEdge::new("W5", "W1", RelationType::References),
        GraphEdge::new("W1", "W2", RelationType::References),
    ];

    let first = merger.add_nodes_and_edges(&mut result.graph, nodes.clone(), edges.clone());
    let counts = (result.graph.node_count(), result.graph.edge_count());
    let second = merger.add_nodes_and_edges(&mut result.graph, nodes, edges);

    assert_eq!(first.nodes_added, 1);
    assert_eq!(first.labels_updated, 1);
    assert_eq!(first.edges_added, 1);
    assert!(second.is_noop());
    assert_eq!(counts, (result.graph.node_count(), result.graph.edge_count()));
}

#[tokio::test]
async fn test_upgraded_label_never_regresses() {
    let fixture = CorpusBuilder::new().build();
    let mut result = fixture.aggregator.load().await;
    let merger = fixture.aggregator.merger();
    let w1 = NodeId::from("W1");
    let position = result.graph.get_node(&w1).unwrap().position();

    merger.add_nodes_and_edges(
        &mut result.graph,
        vec![NodeCandidate::new("W1", EntityType::Work, "Resolved")],
        vec![],
    );
    merger.add_nodes_and_edges(
        &mut result.graph,
        vec![NodeCandidate::new("W1", EntityType::Work, "W1")],
        vec![],
    );

    let node = result.graph.get_node(&w1).unwrap();
    assert_eq!(node.label, "Resolved");
    assert_eq!(node.position(), position);
}

#[tokio::test]
async fn test_explicit_label_updates_and_discovered_edges() {
    let (fixture, mut result) = loaded_all().await;
    let merger = fixture.aggregator.merger();

    let updates = HashMap::from([
        (NodeId::from("W3"), "Renamed survey".to_string()),
        (NodeId::from("W404"), "Not loaded".to_string()),
    ]);
    assert_eq!(merger.update_node_labels(&mut result.graph, &updates).labels_updated, 1);

    let report = merger.add_discovered_edges(
        &mut result.graph,
        vec![
            GraphEdge::new("W3", "W4", RelationType::Related),
            GraphEdge::new("W4", "W3", RelationType::Related),
            GraphEdge::new("W3", "W404", RelationType::Related),
        ],
    );

    assert_eq!(report.edges_added, 1);
    assert_eq!(report.edges_rejected, 1);
    assert_eq!(report.nodes_added, 0);
    assert!(!result.graph.contains_node(&NodeId::from("W404")));
}

#[tokio::test]
async fn test_stats_and_components_of_loaded_graph() {
    let (_fixture, result) = loaded_all().await;
    let (nodes, edges) = (result.graph.nodes(), result.graph.edges());

    let stats = get_graph_stats(nodes, edges);
    assert_eq!(stats.total_nodes, 5);
    assert_eq!(stats.total_edges, 2);
    assert_eq!(stats.connected_components, 3);
    assert_eq!(stats.largest_component_size, 2);
    assert_eq!(stats.nodes_by_type["work"], 4);

    let components = find_connected_components(nodes, edges);
    let sizes: Vec<usize> = components.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2, 1]);

    // Tie between {W1, W2} and {A1, W4}: first discovered wins
    let largest = get_largest_connected_component(nodes, edges);
    let ids: Vec<&str> = largest.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["W1", "W2"]);
}

#[tokio::test]
async fn test_analysis_outcome_applies_to_session_graph() {
    let (fixture, mut result) = loaded_all().await;
    fixture.aggregator.merger().add_discovered_edges(
        &mut result.graph,
        vec![GraphEdge::new("W2", "W4", RelationType::Related)],
    );

    // W1 - W2 - W4 - A1 is now a path; W3 stays isolated
    let path = shortest_path(
        result.graph.nodes(),
        result.graph.edges(),
        &NodeId::from("W1"),
        &NodeId::from("A1"),
    )
    .unwrap();
    assert_eq!(path.len(), 4);

    let ego = extract_ego_network(
        result.graph.nodes(),
        result.graph.edges(),
        &NodeId::from("W2"),
        1,
    )
    .unwrap();
    assert_eq!(ego.nodes.len(), 3);

    let trimmed = trim_leaf_nodes(result.graph.nodes(), result.graph.edges());
    assert_eq!(trimmed.removed_count, 2);
    result.graph.apply(trimmed);

    let ids: Vec<&str> = result.graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["W2", "W3", "W4"]);
    assert_eq!(result.graph.edge_count(), 1);
}

#[tokio::test]
async fn test_new_nodes_use_session_layout() {
    let fixture = CorpusBuilder::new().build();
    let mut result = fixture.aggregator.load().await;
    let source = work("W9", "Placed", 2024);

    fixture.aggregator.merger().add_nodes_and_edges(
        &mut result.graph,
        vec![NodeCandidate::new(source.entity_id, source.entity_type, source.label)],
        vec![],
    );

    let node = result.graph.get_node(&NodeId::from("W9")).unwrap();
    assert_eq!(node.position(), Position::new(0.0, 0.0));
}
