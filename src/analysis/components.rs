//! Connected components and shortest paths, ignoring edge direction

use super::index::Adjacency;
use super::types::{AnalysisOperation, AnalysisOutcome};
use crate::graph::{GraphEdge, GraphNode, NodeId};
use std::collections::{HashMap, HashSet, VecDeque};

/// Partition the nodes into connected components
///
/// Components come in discovery order (by first node in input order); each
/// lists its nodes in BFS order from that first node.
pub fn find_connected_components(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<Vec<NodeId>> {
    let adj = Adjacency::build(nodes, edges);
    let mut visited: HashSet<&NodeId> = HashSet::new();
    let mut components = Vec::new();

    for node in nodes {
        if !visited.insert(&node.id) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue: VecDeque<&NodeId> = VecDeque::from([&node.id]);
        while let Some(id) = queue.pop_front() {
            component.push(id.clone());
            for neighbor in adj.neighbors(id) {
                if visited.insert(*neighbor) {
                    queue.push_back(*neighbor);
                }
            }
        }
        components.push(component);
    }

    components
}

/// The subgraph of the largest component; ties go to the one found first
pub fn get_largest_connected_component(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
) -> AnalysisOutcome {
    let components = find_connected_components(nodes, edges);
    let mut largest: Option<&Vec<NodeId>> = None;
    for component in &components {
        if largest.map_or(true, |l| component.len() > l.len()) {
            largest = Some(component);
        }
    }
    let keep: HashSet<&NodeId> = largest.into_iter().flatten().collect();
    AnalysisOutcome::retain(nodes, edges, &keep, AnalysisOperation::LargestConnectedComponent)
}

/// Fewest-hop path from `from` to `to`, both ends included
///
/// `None` when either node is missing or they are not connected.
pub fn shortest_path(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    from: &NodeId,
    to: &NodeId,
) -> Option<Vec<NodeId>> {
    let adj = Adjacency::build(nodes, edges);
    if !adj.contains(from) || !adj.contains(to) {
        return None;
    }
    if from == to {
        return Some(vec![from.clone()]);
    }

    let mut predecessors: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut visited: HashSet<&NodeId> = HashSet::from([from]);
    let mut queue: VecDeque<&NodeId> = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        for neighbor in adj.neighbors(current) {
            if !visited.insert(*neighbor) {
                continue;
            }
            predecessors.insert(*neighbor, current);
            if *neighbor == to {
                // Walk back to the start
                let mut path = vec![to.clone()];
                let mut step = to;
                while let Some(prev) = predecessors.get(step) {
                    path.push((*prev).clone());
                    step = *prev;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(*neighbor);
        }
    }

    None
}
