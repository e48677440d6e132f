//! Benchmark parameter types.
//!
//! The `Display` impls double as Criterion benchmark identifiers.

use std::fmt;

/// Parameters for a node-table growth benchmark run.
#[derive(Clone, Debug)]
pub struct GrowthBenchParams {
    /// Node slots allocated when the graph is created.
    pub initial_capacity: usize,
    /// Number of nodes admitted one at a time.
    pub node_count: usize,
}

impl fmt::Display for GrowthBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "init={},n={}", self.initial_capacity, self.node_count)
    }
}

/// Parameters for a synthetic wiring benchmark run.
#[derive(Clone, Debug)]
pub struct WiringBenchParams {
    /// Number of nodes inserted.
    pub node_count: usize,
    /// Upper-level neighbour bound (M).
    pub max_connections: usize,
}

impl fmt::Display for WiringBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},M={}", self.node_count, self.max_connections)
    }
}
