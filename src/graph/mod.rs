//! Core graph data structures

mod edge;
mod node;
mod state;

#[cfg(test)]
mod tests;

pub use edge::{EdgeKey, GraphEdge, RelationType};
pub use node::{
    EntityAttributes, EntityType, GraphNode, NodeId, Position, Properties, PropertyValue,
};
pub use state::{EdgeInsert, GraphSnapshot, GraphState};
