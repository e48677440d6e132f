use crate::graph::core::HnswGraph;

use super::{EvaluationMode, GraphInvariantViolation};

pub(super) fn check_degree_bounds(
    graph: &HnswGraph,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    for (level, node, list) in graph.adjacency() {
        let limit = graph.max_connections_for(level);
        let degree = list.len();
        if list.capacity() != limit || degree > limit {
            mode.record(GraphInvariantViolation::DegreeBounds {
                node,
                level,
                degree,
                capacity: list.capacity(),
                limit,
            })?;
        }
    }
    Ok(())
}
