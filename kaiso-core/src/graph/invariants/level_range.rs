use crate::graph::core::HnswGraph;

use super::{EvaluationMode, GraphInvariantViolation};

pub(super) fn check_level_range(
    graph: &HnswGraph,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    let level_count = graph.level_count();
    for (node, level) in graph.assigned_nodes() {
        if level >= level_count {
            mode.record(GraphInvariantViolation::LevelRange {
                node,
                level,
                level_count,
            })?;
        }
    }
    Ok(())
}
