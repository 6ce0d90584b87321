//! End-to-end collection passes over the fixture corpus

mod common;

use common::CorpusBuilder;
use mosaic::source::{HISTORY_SOURCE, LOCAL_CACHE_SOURCE, WORKING_SET_SOURCE};
use mosaic::storage::ToggleStore;
use mosaic::{
    Aggregator, GraphEdge, KeyValueStore, MosaicConfig, NodeId, OpenStore, RelationType,
    SqliteStore,
};
use std::sync::Arc;

fn enable_all(fixture: &common::Fixture) {
    for id in [WORKING_SET_SOURCE, HISTORY_SOURCE, LOCAL_CACHE_SOURCE] {
        fixture.aggregator.set_enabled(id, true);
    }
}

fn label(result: &mosaic::AggregatedGraph, id: &str) -> String {
    result
        .graph
        .get_node(&NodeId::from(id))
        .map(|n| n.label.clone())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_default_session_loads_bookmarks() {
    let fixture = CorpusBuilder::new().build();

    let result = fixture.aggregator.load().await;

    let ids: Vec<&str> = result.graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["W1", "W2", "A1"]);
    assert_eq!(result.graph.edge_count(), 2);

    let authorship = result
        .graph
        .edges()
        .iter()
        .find(|e| e.relation_type == RelationType::Authorship)
        .unwrap();
    assert_eq!(authorship.id, "A1-W2-authorship");
    assert_eq!(authorship.weight, 0.9);
    assert_eq!(authorship.author_position.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_all_sources_dedupe_with_working_set_priority() {
    let fixture = CorpusBuilder::new().build();
    enable_all(&fixture);

    let result = fixture.aggregator.load().await;

    let ids: Vec<&str> = result.graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["W1", "A1", "W2", "W3", "W4"]);
    assert_eq!(label(&result, "W1"), "Graph aggregation in practice");
    assert_eq!(label(&result, "A1"), "Ada Lovelace");

    // The bookmarked A1 lost, so its authorship of W2 is gone too
    let edge_ids: Vec<&str> = result.graph.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids, vec!["W2-W1-references", "W4-A1-authorship"]);

    let cache = result
        .sources
        .iter()
        .find(|s| s.source == LOCAL_CACHE_SOURCE)
        .unwrap();
    assert_eq!(cache.entity_count, Some(1));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_failing_source_is_recorded_not_fatal() {
    let fixture = CorpusBuilder::new().failing_history("rate limited").build();
    enable_all(&fixture);

    let result = fixture.aggregator.load().await;

    assert_eq!(result.graph.node_count(), 4);
    assert!(result.error.is_none());
    let history = result.sources.iter().find(|s| s.source == HISTORY_SOURCE).unwrap();
    assert!(history.error.as_deref().unwrap().contains("rate limited"));
    assert_eq!(history.entity_count, None);
}

#[tokio::test]
async fn test_overlay_edges_from_relationship_store() {
    let fixture = CorpusBuilder::new().build();
    enable_all(&fixture);
    fixture
        .store
        .save_edge(&GraphEdge::new("W3", "W1", RelationType::References))
        .unwrap();
    // Reverse of an edge the entities already declare
    fixture
        .store
        .save_edge(&GraphEdge::new("W1", "W2", RelationType::References))
        .unwrap();
    fixture
        .store
        .save_edge(&GraphEdge::new("W3", "W999", RelationType::References))
        .unwrap();

    let result = fixture.aggregator.load().await;

    let edge_ids: Vec<&str> = result.graph.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        edge_ids,
        vec!["W2-W1-references", "W4-A1-authorship", "W3-W1-references"]
    );
    assert!(!result.graph.contains_node(&NodeId::from("W999")));
}

#[tokio::test]
async fn test_toggle_state_survives_reopen() {
    let fixture = CorpusBuilder::new().build();
    let result = fixture.aggregator.toggle_source(HISTORY_SOURCE).await;
    assert!(result.graph.contains_node(&NodeId::from("W3")));

    let reopened: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(fixture.db_path()).unwrap());
    let config = MosaicConfig::default();
    let toggles = ToggleStore::new(
        reopened.clone(),
        config.toggle_key.clone(),
        config.default_enabled_source.clone(),
    );
    assert!(toggles.load().contains(HISTORY_SOURCE));

    let fresh = Aggregator::new(config, reopened).unwrap();
    assert_eq!(fresh.enabled_sources().len(), 2);
}

#[tokio::test]
async fn test_corrupt_toggle_state_falls_back_to_default() {
    let fixture = CorpusBuilder::new().build();
    fixture
        .store
        .set(&fixture.aggregator.config().toggle_key, "not json")
        .unwrap();

    let result = fixture.aggregator.load().await;

    assert_eq!(result.graph.node_count(), 3);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_reload_supersedes_previous_graph() {
    let fixture = CorpusBuilder::new().build();
    let before = fixture.aggregator.load().await;
    assert!(before.graph.contains_node(&NodeId::from("W2")));

    fixture.aggregator.set_enabled(mosaic::source::BOOKMARKS_SOURCE, false);
    let after = fixture.aggregator.toggle_source(HISTORY_SOURCE).await;

    let ids: Vec<&str> = after.graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["W3"]);
}

#[tokio::test]
async fn test_probe_counts_reports_every_source() {
    let fixture = CorpusBuilder::new().failing_history("offline").build();

    let states = fixture.aggregator.probe_counts().await;

    let counts: Vec<Option<usize>> = states.iter().map(|s| s.entity_count).collect();
    assert_eq!(counts, vec![Some(2), Some(3), None, Some(1)]);
    let enabled: Vec<bool> = states.iter().map(|s| s.enabled).collect();
    assert_eq!(enabled, vec![false, true, false, false]);
}
