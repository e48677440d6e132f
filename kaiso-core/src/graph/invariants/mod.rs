//! Structural invariant checks for the HNSW adjacency storage.
//!
//! The checkers are surfaced via [`HnswGraph::invariants`] so consumers and
//! property tests can assert graph health after each mutation without walking
//! the tables themselves.

mod degree_bounds;
mod layer_membership;
mod level_range;
mod neighbour_range;

use thiserror::Error;

use crate::graph::core::HnswGraph;

use self::{
    degree_bounds::check_degree_bounds, layer_membership::check_layer_membership,
    level_range::check_level_range, neighbour_range::check_neighbour_range,
};

/// Enumerates the structural invariants the storage can verify.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphInvariant {
    /// Every neighbour list has the capacity of its level and stays within it.
    DegreeBounds,
    /// Every assigned node level refers to an allocated level.
    LevelRange,
    /// Every stored neighbour identifier refers to an allocated node slot.
    NeighbourRange,
    /// Nodes only own neighbour lists on levels up to their assigned level.
    LayerMembership,
}

impl GraphInvariant {
    /// Returns all invariants in the order they should be evaluated.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::DegreeBounds,
            Self::LevelRange,
            Self::NeighbourRange,
            Self::LayerMembership,
        ]
    }
}

/// Reports an invariant violation surfaced by [`GraphInvariantChecker`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GraphInvariantViolation {
    /// A list's capacity differs from its level bound or its length exceeds it.
    #[error(
        "node {node} on level {level} holds {degree} neighbour(s) with capacity {capacity}, expected bound {limit}"
    )]
    DegreeBounds {
        /// Node owning the list.
        node: usize,
        /// Level of the list.
        level: usize,
        /// Number of stored neighbours.
        degree: usize,
        /// Capacity the list was created with.
        capacity: usize,
        /// Bound configured for the level.
        limit: usize,
    },
    /// A node's assigned level is not below the level count.
    #[error("node {node} is assigned level {level}, but only {level_count} level(s) exist")]
    LevelRange {
        /// Node with the out-of-range level.
        node: usize,
        /// Assigned level.
        level: usize,
        /// Allocated level count.
        level_count: usize,
    },
    /// A list references a node identifier beyond the node capacity.
    #[error("node {origin} references {target} on level {level}, beyond capacity {capacity}")]
    NeighbourRange {
        /// Node owning the list.
        origin: usize,
        /// Referenced identifier.
        target: usize,
        /// Level of the list.
        level: usize,
        /// Node capacity.
        capacity: usize,
    },
    /// A node owns a list above its assigned level, or has no level at all.
    #[error("node {node} owns a list on level {level} but its top level is {top:?}")]
    LayerMembership {
        /// Node owning the list.
        node: usize,
        /// Level of the list.
        level: usize,
        /// Assigned top level, `None` when unassigned.
        top: Option<usize>,
    },
}

/// Helper returned by [`HnswGraph::invariants`] to run structural checks.
#[derive(Debug)]
pub struct GraphInvariantChecker<'graph> {
    graph: &'graph HnswGraph,
}

impl<'graph> GraphInvariantChecker<'graph> {
    pub(crate) fn new(graph: &'graph HnswGraph) -> Self {
        Self { graph }
    }

    /// Runs all invariants, returning the first violation encountered.
    ///
    /// # Errors
    /// Returns the first [`GraphInvariantViolation`] found.
    pub fn check_all(&self) -> Result<(), GraphInvariantViolation> {
        self.check_many(GraphInvariant::all())
    }

    /// Runs a custom subset of invariants in the provided order.
    ///
    /// # Errors
    /// Returns the first [`GraphInvariantViolation`] found.
    pub fn check_many(
        &self,
        invariants: impl IntoIterator<Item = GraphInvariant>,
    ) -> Result<(), GraphInvariantViolation> {
        self.run_with_mode(invariants, &mut EvaluationMode::FailFast)
    }

    /// Runs a single invariant.
    ///
    /// # Errors
    /// Returns the first [`GraphInvariantViolation`] found.
    pub fn check(&self, invariant: GraphInvariant) -> Result<(), GraphInvariantViolation> {
        self.check_many([invariant])
    }

    /// Runs the degree-bound invariant directly.
    ///
    /// # Errors
    /// Returns the first oversized or mis-sized list.
    pub fn degree_bounds(&self) -> Result<(), GraphInvariantViolation> {
        self.check(GraphInvariant::DegreeBounds)
    }

    /// Runs the level-range invariant directly.
    ///
    /// # Errors
    /// Returns the first node whose level exceeds the level count.
    pub fn level_range(&self) -> Result<(), GraphInvariantViolation> {
        self.check(GraphInvariant::LevelRange)
    }

    /// Runs the neighbour-range invariant directly.
    ///
    /// # Errors
    /// Returns the first dangling neighbour reference.
    pub fn neighbour_range(&self) -> Result<(), GraphInvariantViolation> {
        self.check(GraphInvariant::NeighbourRange)
    }

    /// Runs the layer-membership invariant directly.
    ///
    /// # Errors
    /// Returns the first list owned above its node's level.
    pub fn layer_membership(&self) -> Result<(), GraphInvariantViolation> {
        self.check(GraphInvariant::LayerMembership)
    }

    /// Executes every invariant and returns the full set of violations.
    #[must_use]
    pub fn collect_all(&self) -> Vec<GraphInvariantViolation> {
        self.collect_many(GraphInvariant::all())
    }

    /// Executes the selected invariants and returns every violation discovered.
    #[must_use]
    pub fn collect_many(
        &self,
        invariants: impl IntoIterator<Item = GraphInvariant>,
    ) -> Vec<GraphInvariantViolation> {
        let mut violations = Vec::new();
        let _ = self.run_with_mode(invariants, &mut EvaluationMode::Collect(&mut violations));
        violations
    }

    fn run_with_mode(
        &self,
        invariants: impl IntoIterator<Item = GraphInvariant>,
        mode: &mut EvaluationMode<'_>,
    ) -> Result<(), GraphInvariantViolation> {
        for invariant in invariants {
            dispatch(self.graph, invariant, mode)?;
        }
        Ok(())
    }
}

fn dispatch(
    graph: &HnswGraph,
    invariant: GraphInvariant,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    match invariant {
        GraphInvariant::DegreeBounds => check_degree_bounds(graph, mode),
        GraphInvariant::LevelRange => check_level_range(graph, mode),
        GraphInvariant::NeighbourRange => check_neighbour_range(graph, mode),
        GraphInvariant::LayerMembership => check_layer_membership(graph, mode),
    }
}

pub(super) enum EvaluationMode<'a> {
    FailFast,
    Collect(&'a mut Vec<GraphInvariantViolation>),
}

impl EvaluationMode<'_> {
    fn record(
        &mut self,
        violation: GraphInvariantViolation,
    ) -> Result<(), GraphInvariantViolation> {
        tracing::debug!(%violation, "graph invariant violated");
        match self {
            Self::FailFast => Err(violation),
            Self::Collect(sink) => {
                sink.push(violation);
                Ok(())
            }
        }
    }
}
