use tracing::{Level, trace};

use crate::graph::core::HnswGraph;

use super::{EvaluationMode, GraphInvariantViolation};

pub(super) fn check_neighbour_range(
    graph: &HnswGraph,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    let capacity = graph.node_capacity();
    if tracing::enabled!(Level::TRACE) {
        trace!(
            edges = graph.total_edges(),
            capacity, "checking neighbour ranges"
        );
    }
    for (level, origin, list) in graph.adjacency() {
        for target in list.iter().filter(|&target| target >= capacity) {
            mode.record(GraphInvariantViolation::NeighbourRange {
                origin,
                target,
                level,
                capacity,
            })?;
        }
    }
    Ok(())
}
