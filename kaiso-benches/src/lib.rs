//! Benchmark support crate for kaiso.
//!
//! Provides parameter types and a seeded synthetic wiring driver used by the
//! Criterion benchmarks for node-table growth and neighbour-list churn.

pub mod error;
pub mod params;
pub mod wiring;
