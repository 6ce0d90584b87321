//! Initial placement for newly created nodes
//!
//! Aggregation never moves an existing node; it only asks a [`Layout`] where
//! to put a node the first time it appears.

use crate::graph::{NodeId, Position};

/// Assigns a position to a node at creation time
pub trait Layout: Send + Sync {
    /// Position for `id`, placed as the graph's `index`-th node
    fn place(&self, id: &NodeId, index: usize) -> Position;
}

/// Uniform scatter over a square centered on the origin
#[derive(Debug, Clone)]
pub struct RandomLayout {
    spread: f64,
}

impl RandomLayout {
    pub fn new(spread: f64) -> Self {
        Self { spread }
    }

    /// Uniform sample in [0, 1)
    fn unit() -> f64 {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_err() {
            return 0.5;
        }
        // 53 random mantissa bits
        (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl Default for RandomLayout {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl Layout for RandomLayout {
    fn place(&self, _id: &NodeId, _index: usize) -> Position {
        let half = self.spread / 2.0;
        Position::new(
            Self::unit() * self.spread - half,
            Self::unit() * self.spread - half,
        )
    }
}

/// Every node at the same position
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLayout(pub Position);

impl Layout for FixedLayout {
    fn place(&self, _id: &NodeId, _index: usize) -> Position {
        self.0
    }
}

/// Row-major grid, deterministic in placement order
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub columns: usize,
    pub spacing: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 10,
            spacing: 50.0,
        }
    }
}

impl Layout for GridLayout {
    fn place(&self, _id: &NodeId, index: usize) -> Position {
        let columns = self.columns.max(1);
        Position::new(
            (index % columns) as f64 * self.spacing,
            (index / columns) as f64 * self.spacing,
        )
    }
}
