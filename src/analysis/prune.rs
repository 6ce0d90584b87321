//! Node-removing filters
//!
//! Each function takes one pass over the input and returns the surviving
//! subgraph. Repeated calls converge.

use super::index::Adjacency;
use super::types::{AnalysisError, AnalysisOperation, AnalysisOutcome, AnalysisResult};
use crate::graph::{GraphEdge, GraphNode, NodeId};
use std::collections::{HashMap, HashSet};

/// Undirected degree of every node; self-loops count twice
pub fn degree_map(nodes: &[GraphNode], edges: &[GraphEdge]) -> HashMap<NodeId, usize> {
    Adjacency::build(nodes, edges)
        .into_degrees()
        .into_iter()
        .map(|(id, d)| (id.clone(), d))
        .collect()
}

fn keep_unless<'a>(
    nodes: &'a [GraphNode],
    remove: impl Fn(&NodeId) -> bool,
) -> HashSet<&'a NodeId> {
    nodes.iter().map(|n| &n.id).filter(|id| !remove(*id)).collect()
}

/// Remove dangling ends: degree-1 nodes whose only neighbor has degree > 1
///
/// On a path `A-B-C` this removes `A` and `C`. An isolated pair `A-B` is
/// left alone.
pub fn trim_leaf_nodes(nodes: &[GraphNode], edges: &[GraphEdge]) -> AnalysisOutcome {
    let adj = Adjacency::build(nodes, edges);
    let keep = keep_unless(nodes, |id| {
        adj.degree(id) == 1 && adj.neighbors(id).iter().all(|n| adj.degree(n) > 1)
    });
    AnalysisOutcome::retain(nodes, edges, &keep, AnalysisOperation::TrimLeafNodes)
}

/// Remove dangling ends that are the source of their only edge
pub fn trim_root_nodes(nodes: &[GraphNode], edges: &[GraphEdge]) -> AnalysisOutcome {
    let adj = Adjacency::build(nodes, edges);
    let keep = keep_unless(nodes, |id| {
        if adj.degree(id) != 1 {
            return false;
        }
        let outgoing = edges
            .iter()
            .find(|e| e.touches(id) && adj.contains(e.other_end(id)))
            .is_some_and(|e| &e.source == id);
        outgoing && adj.neighbors(id).iter().all(|n| adj.degree(n) > 1)
    });
    AnalysisOutcome::retain(nodes, edges, &keep, AnalysisOperation::TrimRootNodes)
}

/// Remove every node of degree exactly 1
pub fn trim_degree1_nodes(nodes: &[GraphNode], edges: &[GraphEdge]) -> AnalysisOutcome {
    let adj = Adjacency::build(nodes, edges);
    let keep = keep_unless(nodes, |id| adj.degree(id) == 1);
    AnalysisOutcome::retain(nodes, edges, &keep, AnalysisOperation::TrimDegree1Nodes)
}

/// Remove every node with no edges
pub fn remove_isolated_nodes(nodes: &[GraphNode], edges: &[GraphEdge]) -> AnalysisOutcome {
    let adj = Adjacency::build(nodes, edges);
    let keep = keep_unless(nodes, |id| adj.degree(id) == 0);
    AnalysisOutcome::retain(nodes, edges, &keep, AnalysisOperation::RemoveIsolatedNodes)
}

/// Keep nodes whose year falls in `[min_year, max_year]`
///
/// Nodes without a year are dropped.
pub fn filter_by_publication_year(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    min_year: i32,
    max_year: i32,
) -> AnalysisResult<AnalysisOutcome> {
    if min_year > max_year {
        return Err(AnalysisError::InvalidYearRange {
            min: min_year,
            max: max_year,
        });
    }
    let keep: HashSet<&NodeId> = nodes
        .iter()
        .filter(|n| n.year().is_some_and(|y| (min_year..=max_year).contains(&y)))
        .map(|n| &n.id)
        .collect();
    Ok(AnalysisOutcome::retain(
        nodes,
        edges,
        &keep,
        AnalysisOperation::FilterByPublicationYear,
    ))
}
