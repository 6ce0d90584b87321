//! Graph analysis library
//!
//! Stateless functions over `(nodes, edges)` slices. Operations that remove
//! nodes return an [`AnalysisOutcome`] the caller can apply to its
//! [`GraphState`](crate::graph::GraphState); read-only ones return plain
//! values. Edge direction is ignored everywhere except [`trim_root_nodes`].

mod components;
mod ego;
mod index;
mod prune;
mod stats;
mod types;

pub use components::{find_connected_components, get_largest_connected_component, shortest_path};
pub use ego::extract_ego_network;
pub use prune::{
    degree_map, filter_by_publication_year, remove_isolated_nodes, trim_degree1_nodes,
    trim_leaf_nodes, trim_root_nodes,
};
pub use stats::{get_graph_stats, GraphStats};
pub use types::{AnalysisError, AnalysisOperation, AnalysisOutcome, AnalysisResult};
