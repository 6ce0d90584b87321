//! Serialization tests with fixtures in the exchanged wire shape

use serde_json::{json, Value};

/// Fixture: a node as rendered to the visualization layer
fn node_fixture() -> Value {
    json!({
        "id": "W2741809807",
        "entity_type": "work",
        "label": "The state of OA",
        "x": 12.5,
        "y": -40.0,
        "source_id": "collection:bookmarks",
        "attributes": {
            "is_persistent_set_member": false,
            "year": 2018,
            "extra": { "doi": "10.7717/peerj.4375" }
        }
    })
}

/// Fixture: an authorship edge with every optional field present
fn edge_fixture() -> Value {
    json!({
        "id": "W2741809807-A5023888391-authorship",
        "source": "W2741809807",
        "target": "A5023888391",
        "relation_type": "authorship",
        "weight": 1.0,
        "author_position": "first",
        "is_corresponding": true,
        "is_open_access": true
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use crate::graph::{
        EdgeKey, EntityAttributes, EntityType, GraphEdge, GraphNode, GraphState, NodeId,
        Position, PropertyValue, RelationType,
    };

    #[test]
    fn node_id_serializes_as_string() {
        let id = NodeId::from_string("A5023888391");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"A5023888391\"");
    }

    #[test]
    fn entity_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntityType::Institution).unwrap(), "\"institution\"");
        let t: EntityType = serde_json::from_str("\"funder\"").unwrap();
        assert_eq!(t, EntityType::Funder);
    }

    #[test]
    fn unknown_entity_type_survives_roundtrip() {
        let t: EntityType = serde_json::from_str("\"keyword\"").unwrap();
        assert_eq!(t, EntityType::Custom("keyword".into()));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"keyword\"");
    }

    #[test]
    fn relation_type_uses_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&RelationType::PublishedIn).unwrap(),
            "\"published_in\""
        );
        let r: RelationType = serde_json::from_str("\"cites_dataset\"").unwrap();
        assert_eq!(r.as_str(), "cites_dataset");
    }

    #[test]
    fn edge_id_is_rendered_key() {
        let edge = GraphEdge::new("W1", "A1", RelationType::Authorship);
        assert_eq!(edge.id, "W1-A1-authorship");
        assert_eq!(edge.key().reversed().to_string(), "A1-W1-authorship");
    }

    #[test]
    fn edge_weight_follows_score() {
        let edge = GraphEdge::new("W1", "T1", RelationType::HasTopic).with_score(0.42);
        assert_eq!(edge.weight, 0.42);
        assert_eq!(edge.score, Some(0.42));
    }

    #[test]
    fn edge_optional_fields_skipped_when_none() {
        let edge = GraphEdge::new("W1", "W2", RelationType::References);
        let json = serde_json::to_value(&edge).unwrap();

        assert!(json.get("score").is_none());
        assert!(json.get("author_position").is_none());
        assert!(json.get("is_corresponding").is_none());
    }

    #[test]
    fn can_deserialize_node_fixture() {
        let result: Result<GraphNode, _> = serde_json::from_value(node_fixture());
        assert!(result.is_ok(), "Failed to deserialize node fixture: {:?}", result.err());

        let node = result.unwrap();
        assert_eq!(node.id.as_str(), "W2741809807");
        assert_eq!(node.entity_type, EntityType::Work);
        assert_eq!(node.position(), Position::new(12.5, -40.0));
        assert_eq!(node.year(), Some(2018));
        assert_eq!(
            node.attributes.extra.get("doi"),
            Some(&PropertyValue::String("10.7717/peerj.4375".into()))
        );
    }

    #[test]
    fn can_deserialize_edge_fixture() {
        let result: Result<GraphEdge, _> = serde_json::from_value(edge_fixture());
        assert!(result.is_ok(), "Failed to deserialize edge fixture: {:?}", result.err());

        let edge = result.unwrap();
        assert_eq!(edge.relation_type, RelationType::Authorship);
        assert_eq!(edge.author_position.as_deref(), Some("first"));
        assert_eq!(edge.is_corresponding, Some(true));
        assert_eq!(
            edge.key(),
            EdgeKey::new("W2741809807".into(), "A5023888391".into(), RelationType::Authorship)
        );
    }

    #[test]
    fn node_with_minimal_fields_gets_default_attributes() {
        let node: GraphNode = serde_json::from_value(json!({
            "id": "I1", "entity_type": "institution", "label": "I1", "x": 0.0, "y": 0.0
        }))
        .unwrap();

        assert_eq!(node.attributes, EntityAttributes::default());
        assert!(node.source_id.is_none());
    }

    #[test]
    fn graph_state_roundtrip_rebuilds_indexes() {
        let fixture = json!({
            "nodes": [node_fixture(), {
                "id": "A5023888391", "entity_type": "author", "label": "Heather Piwowar",
                "x": 1.0, "y": 2.0
            }],
            "edges": [edge_fixture()]
        });

        let state: GraphState = serde_json::from_value(fixture).unwrap();
        assert_eq!(state.node_count(), 2);
        assert_eq!(state.edge_count(), 1);
        assert!(state.contains_node(&NodeId::from("A5023888391")));
        assert!(state.contains_edge(
            &EdgeKey::new("A5023888391".into(), "W2741809807".into(), RelationType::Authorship)
        ));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["edges"][0]["id"], "W2741809807-A5023888391-authorship");
    }
}
