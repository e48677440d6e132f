//! Kaiso core library.
//!
//! Multi-level adjacency storage for HNSW approximate-nearest-neighbour
//! indexes: per-node level assignments plus bounded, lazily allocated
//! neighbour lists per (level, node) pair. Distance functions, vector storage,
//! insertion and search algorithms live with the caller.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod graph;

pub use crate::{
    error::{GraphError, GraphErrorCode, Result},
    graph::{
        GraphInvariant, GraphInvariantChecker, GraphInvariantViolation, GraphParams, HnswGraph,
        NeighbourList, SharedHnswGraph,
    },
};
