//! Multi-level adjacency storage for an HNSW index.

use tracing::{debug, instrument, trace};

use crate::error::GraphError;

use super::{
    invariants::GraphInvariantChecker,
    neighbours::NeighbourList,
    params::GraphParams,
    tables::{AdjacencyTable, NodeLevelTable},
    telemetry,
};

/// Level assignments and per-level neighbour lists for every node.
///
/// The graph holds no vectors and no distance function. Insertion and search
/// algorithms drive it through [`ensure_node_capacity`](Self::ensure_node_capacity),
/// [`ensure_neighbour_list`](Self::ensure_neighbour_list),
/// [`set_level_of_node`](Self::set_level_of_node) and the read-only lookups.
///
/// Level 0 always exists. Upper levels are added on demand and never removed;
/// neighbour lists are allocated on first use and keep their identity and
/// contents across every later growth of the graph.
///
/// # Examples
/// ```
/// use kaiso_core::HnswGraph;
///
/// let mut graph = HnswGraph::new(2, 4, 2).expect("bounds must be positive");
/// assert_eq!(graph.ensure_neighbour_list(0, 0).expect("node 0 fits").capacity(), 4);
///
/// let upper = graph.ensure_neighbour_list(2, 5).expect("node 5 is representable");
/// assert_eq!(upper.capacity(), 2);
/// assert!(upper.add_if_absent(0));
/// assert_eq!(graph.level_count(), 3);
/// assert!(graph.node_capacity() >= 6);
///
/// graph.set_level_of_node(5, 2).expect("level 2 is allocated");
/// assert_eq!(graph.level_of_node(5), Ok(Some(2)));
/// ```
#[derive(Clone, Debug)]
pub struct HnswGraph {
    params: GraphParams,
    levels: NodeLevelTable,
    layers: Vec<AdjacencyTable>,
}

impl HnswGraph {
    /// Creates a graph with the given degree bounds and `initial_capacity`
    /// unassigned node slots.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when either bound is zero.
    pub fn new(
        max_connections: usize,
        max_base_connections: usize,
        initial_capacity: usize,
    ) -> Result<Self, GraphError> {
        let params = GraphParams::new(max_connections, max_base_connections)?
            .with_initial_capacity(initial_capacity);
        Ok(Self::with_params(params))
    }

    /// Creates a graph from validated parameters.
    #[must_use]
    pub fn with_params(params: GraphParams) -> Self {
        let capacity = params.initial_capacity();
        Self {
            levels: NodeLevelTable::with_len(capacity),
            layers: vec![AdjacencyTable::with_len(params.bound_for(0), capacity)],
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &GraphParams {
        &self.params
    }

    /// Returns the number of allocated node slots.
    #[must_use]
    #[inline]
    pub fn node_capacity(&self) -> usize {
        self.levels.len()
    }

    /// Returns the number of allocated levels, which is always at least one.
    #[must_use]
    #[inline]
    pub fn level_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns the neighbour bound applied to lists created at `level`.
    #[must_use]
    pub fn max_connections_for(&self, level: usize) -> usize {
        self.params.max_connections_for(level)
    }

    /// Grows every node-indexed table so that at least `capacity` nodes fit.
    ///
    /// Does nothing when the graph already holds `capacity` slots. Growth is
    /// geometric: the new capacity is the larger of `capacity` and twice the
    /// current capacity. Existing levels and neighbour lists are untouched;
    /// new slots start unassigned and without lists.
    pub fn ensure_node_capacity(&mut self, capacity: usize) {
        let current = self.node_capacity();
        if capacity <= current {
            return;
        }
        self.grow_node_tables(current.saturating_mul(2).max(capacity));
    }

    #[instrument(name = "graph.grow_node_tables", level = "debug", skip(self))]
    fn grow_node_tables(&mut self, capacity: usize) {
        let previous = self.node_capacity();
        self.levels.grow_to(capacity);
        for layer in &mut self.layers {
            layer.grow_to(capacity);
        }
        debug_assert!(
            self.layers.iter().all(|layer| layer.len() == capacity),
            "every adjacency table tracks the node capacity"
        );
        debug!(
            from = previous,
            to = capacity,
            levels = self.level_count(),
            "grew node capacity"
        );
        telemetry::record_node_capacity(capacity);
    }

    /// Returns the top level assigned to `node`, or `None` when the node has
    /// not been placed in the graph.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] when `node` is not below
    /// [`node_capacity`](Self::node_capacity).
    pub fn level_of_node(&self, node: usize) -> Result<Option<usize>, GraphError> {
        self.levels
            .get(node)
            .ok_or_else(|| self.node_out_of_range(node))
    }

    /// Records `level` as the top level of `node`.
    ///
    /// The level must already be allocated: request a neighbour list at the
    /// node's top level first, which grows the level count as needed.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] when `node` is outside the node
    /// capacity, [`GraphError::LevelOutOfRange`] when `level` is not below
    /// [`level_count`](Self::level_count) and
    /// [`GraphError::LevelAlreadyAssigned`] when the node already has a level.
    /// The graph is left unchanged in every case.
    pub fn set_level_of_node(&mut self, node: usize, level: usize) -> Result<(), GraphError> {
        let out_of_range = self.node_out_of_range(node);
        let level_count = self.level_count();
        let slot = self.levels.slot_mut(node).ok_or(out_of_range)?;
        if level >= level_count {
            return Err(GraphError::LevelOutOfRange { level, level_count });
        }
        if let Some(existing) = *slot {
            return Err(GraphError::LevelAlreadyAssigned {
                node,
                level: existing,
            });
        }
        *slot = Some(level);
        Ok(())
    }

    /// Returns the neighbour list for `(level, node)`, creating it when absent.
    ///
    /// New lists receive `max_base_connections` slots on level 0 and
    /// `max_connections` slots above it. A `node` outside the node capacity
    /// grows the graph as [`ensure_node_capacity`](Self::ensure_node_capacity)
    /// would, and a `level` at or beyond [`level_count`](Self::level_count)
    /// first allocates every missing level. Lists created earlier keep their
    /// contents and addresses.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] only when `node + 1` or
    /// `level + 1` overflows `usize`. Nothing is allocated on failure.
    pub fn ensure_neighbour_list(
        &mut self,
        level: usize,
        node: usize,
    ) -> Result<&mut NeighbourList, GraphError> {
        let required_capacity = node
            .checked_add(1)
            .ok_or_else(|| GraphError::InvalidParameters {
                reason: format!("node {node} cannot be represented"),
            })?;
        let required_levels = level_count_for(level)?;
        self.ensure_node_capacity(required_capacity);
        self.ensure_level_count(required_levels);

        let capacity = self.node_capacity();
        let level_count = self.level_count();
        let table = self
            .layers
            .get_mut(level)
            .ok_or(GraphError::LevelOutOfRange { level, level_count })?;
        let (list, created) = table
            .get_or_create(node)
            .ok_or(GraphError::NodeOutOfRange { node, capacity })?;
        if created {
            trace!(level, node, capacity = list.capacity(), "allocated neighbour list");
            telemetry::record_list_allocated(level);
        }
        Ok(list)
    }

    /// Looks up the neighbour list for `(level, node)` without allocating.
    ///
    /// Returns `Ok(None)` when no list was created for the pair, including
    /// when `level` is not below [`level_count`](Self::level_count).
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] when `node` is outside the node
    /// capacity.
    pub fn neighbour_list(
        &self,
        level: usize,
        node: usize,
    ) -> Result<Option<&NeighbourList>, GraphError> {
        self.check_node(node)?;
        Ok(self.layers.get(level).and_then(|table| table.get(node)))
    }

    /// Counts the neighbour lists allocated on `level`.
    ///
    /// # Errors
    /// Returns [`GraphError::LevelOutOfRange`] when `level` is not below
    /// [`level_count`](Self::level_count).
    pub fn level_population(&self, level: usize) -> Result<usize, GraphError> {
        self.layers
            .get(level)
            .map(AdjacencyTable::population)
            .ok_or(GraphError::LevelOutOfRange {
                level,
                level_count: self.level_count(),
            })
    }

    /// Iterates over `(node, level)` for every node with an assigned level.
    pub fn assigned_nodes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.levels.assigned()
    }

    /// Iterates over `(level, node, list)` for every allocated neighbour list,
    /// level by level and in ascending node order within a level.
    pub fn adjacency(&self) -> impl Iterator<Item = (usize, usize, &NeighbourList)> + '_ {
        self.layers.iter().enumerate().flat_map(|(level, table)| {
            table.lists().map(move |(node, list)| (level, node, list))
        })
    }

    /// Returns the number of directed edges stored across all levels.
    #[must_use]
    pub fn total_edges(&self) -> usize {
        self.adjacency().map(|(_, _, list)| list.len()).sum()
    }

    /// Returns a checker for the structural invariants of this graph.
    #[must_use]
    pub fn invariants(&self) -> GraphInvariantChecker<'_> {
        GraphInvariantChecker::new(self)
    }

    fn ensure_level_count(&mut self, count: usize) {
        let current = self.level_count();
        if count <= current {
            return;
        }
        let params = self.params;
        let len = self.node_capacity();
        self.layers.extend(
            (current..count).map(|level| AdjacencyTable::with_len(params.bound_for(level), len)),
        );
        debug!(from = current, to = count, "grew level count");
        telemetry::record_level_count(count);
    }

    fn check_node(&self, node: usize) -> Result<(), GraphError> {
        if node < self.node_capacity() {
            Ok(())
        } else {
            Err(self.node_out_of_range(node))
        }
    }

    fn node_out_of_range(&self, node: usize) -> GraphError {
        GraphError::NodeOutOfRange {
            node,
            capacity: self.node_capacity(),
        }
    }

    #[cfg(test)]
    pub(crate) fn table_lengths(&self) -> Vec<usize> {
        self.layers.iter().map(AdjacencyTable::len).collect()
    }

    /// Writes a level without growing the level count, bypassing validation.
    #[cfg(test)]
    pub(crate) fn force_level_for_test(&mut self, node: usize, level: usize) {
        if let Some(slot) = self.levels.slot_mut(node) {
            *slot = Some(level);
        }
    }

    /// Replaces the list stored at `(level, node)`, bypassing the level bound.
    #[cfg(test)]
    pub(crate) fn replace_list_for_test(&mut self, level: usize, node: usize, list: NeighbourList) {
        if let Some(table) = self.layers.get_mut(level) {
            table.replace_for_test(node, list);
        }
    }
}

fn level_count_for(level: usize) -> Result<usize, GraphError> {
    level
        .checked_add(1)
        .ok_or_else(|| GraphError::InvalidParameters {
            reason: format!("level {level} cannot be represented"),
        })
}
