//! Lists above a node's top level are legal for the storage but indicate a
//! consumer that wired edges before assigning the node's level.

use crate::graph::core::HnswGraph;

use super::{EvaluationMode, GraphInvariantViolation};

pub(super) fn check_layer_membership(
    graph: &HnswGraph,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    for (level, node, _) in graph.adjacency() {
        // Node ids yielded by `adjacency` are always inside the capacity.
        let top = graph.level_of_node(node).ok().flatten();
        if top.is_none_or(|top| level > top) {
            mode.record(GraphInvariantViolation::LayerMembership { node, level, top })?;
        }
    }
    Ok(())
}
