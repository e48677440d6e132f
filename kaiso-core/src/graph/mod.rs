//! Storage for a Hierarchical Navigable Small World (HNSW) graph.
//!
//! Each level owns a dense node-indexed table of lazily created, bounded
//! neighbour lists, and a separate table records the top level of every node.
//! Upper levels stay sparse with `max_connections` slots per list while the
//! base layer carries `max_base_connections`.
//!
//! Mutation requires `&mut HnswGraph`, so a single writer grows the graph at a
//! time. [`SharedHnswGraph`] adds a reader/writer lock for callers that search
//! from several threads while one thread inserts.

mod core;
mod invariants;
mod neighbours;
mod params;
mod shared;
mod tables;
mod telemetry;

pub use self::{
    core::HnswGraph,
    invariants::{GraphInvariant, GraphInvariantChecker, GraphInvariantViolation},
    neighbours::NeighbourList,
    params::GraphParams,
    shared::SharedHnswGraph,
};

#[cfg(test)]
mod tests;
