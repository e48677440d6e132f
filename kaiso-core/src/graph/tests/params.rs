//! Parameter validation tests.

use rstest::rstest;

use crate::{GraphError, GraphParams, HnswGraph};

#[rstest]
#[case(0, 4)]
#[case(4, 0)]
#[case(0, 0)]
fn rejects_zero_bounds(#[case] max_connections: usize, #[case] max_base_connections: usize) {
    let err = GraphParams::new(max_connections, max_base_connections)
        .expect_err("zero bounds must be rejected");
    assert!(matches!(err, GraphError::InvalidParameters { .. }));

    let err = HnswGraph::new(max_connections, max_base_connections, 8)
        .expect_err("graph construction must reject zero bounds");
    assert!(matches!(err, GraphError::InvalidParameters { .. }));
}

#[test]
fn base_bound_may_be_smaller_than_upper_bound() {
    let params = GraphParams::new(8, 4).expect("bounds only need to be positive");
    assert_eq!(params.max_connections_for(0), 4);
    assert_eq!(params.max_connections_for(1), 8);
}

#[test]
fn defaults_match_common_hnsw_settings() {
    let params = GraphParams::default();
    assert_eq!(params.max_connections(), 16);
    assert_eq!(params.max_base_connections(), 32);
    assert_eq!(params.initial_capacity(), 16_384);
}

#[test]
fn zero_initial_capacity_is_allowed() {
    let graph = HnswGraph::new(2, 4, 0).expect("zero capacity must be valid");
    assert_eq!(graph.node_capacity(), 0);
    assert_eq!(graph.level_count(), 1);
}
