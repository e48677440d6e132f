//! Metric hooks for structural growth.
//!
//! With the `metrics` feature enabled the graph emits:
//!
//! - `hnsw_graph_node_capacity_grows` (counter)
//! - `hnsw_graph_neighbour_lists_allocated` (counter, labelled by `level`)
//! - `hnsw_graph_node_capacity` (gauge)
//! - `hnsw_graph_level_count` (gauge)
//!
//! Without the feature every hook compiles to nothing.

#[cfg(feature = "metrics")]
pub(crate) fn record_node_capacity(capacity: usize) {
    metrics::counter!("hnsw_graph_node_capacity_grows").increment(1);
    metrics::gauge!("hnsw_graph_node_capacity").set(capacity as f64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_node_capacity(_capacity: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_level_count(level_count: usize) {
    metrics::gauge!("hnsw_graph_level_count").set(level_count as f64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_level_count(_level_count: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_list_allocated(level: usize) {
    metrics::counter!("hnsw_graph_neighbour_lists_allocated", "level" => level.to_string())
        .increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_list_allocated(_level: usize) {}
