//! Parameter handling for the HNSW adjacency storage.

use std::num::NonZeroUsize;

use crate::error::GraphError;

const DEFAULT_MAX_CONNECTIONS: usize = 16;
const DEFAULT_MAX_BASE_CONNECTIONS: usize = 32;
const DEFAULT_INITIAL_CAPACITY: usize = 16_384;

/// Degree bounds and initial sizing for an [`HnswGraph`](crate::HnswGraph).
///
/// `max_connections` (often called `M`) bounds neighbour lists above the base
/// layer; `max_base_connections` (`M0`) bounds lists on level 0. Both are
/// fixed for the lifetime of the graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GraphParams {
    max_connections: NonZeroUsize,
    max_base_connections: NonZeroUsize,
    initial_capacity: usize,
}

impl GraphParams {
    /// Creates a parameter set with explicit degree bounds and no initial
    /// node slots.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when either bound is zero.
    ///
    /// # Examples
    /// ```
    /// use kaiso_core::GraphParams;
    ///
    /// let params = GraphParams::new(16, 32)
    ///     .expect("bounds must be positive")
    ///     .with_initial_capacity(1_024);
    /// assert_eq!(params.max_connections(), 16);
    /// assert_eq!(params.max_base_connections(), 32);
    /// assert_eq!(params.initial_capacity(), 1_024);
    /// ```
    pub fn new(max_connections: usize, max_base_connections: usize) -> Result<Self, GraphError> {
        let max_connections =
            NonZeroUsize::new(max_connections).ok_or_else(|| GraphError::InvalidParameters {
                reason: "max_connections must be greater than zero".into(),
            })?;
        let max_base_connections =
            NonZeroUsize::new(max_base_connections).ok_or_else(|| {
                GraphError::InvalidParameters {
                    reason: "max_base_connections must be greater than zero".into(),
                }
            })?;
        Ok(Self {
            max_connections,
            max_base_connections,
            initial_capacity: 0,
        })
    }

    /// Sets the number of node slots allocated at construction.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Returns the neighbour bound for levels above the base layer.
    #[must_use]
    pub fn max_connections(&self) -> usize {
        self.max_connections.get()
    }

    /// Returns the neighbour bound for the base layer.
    #[must_use]
    pub fn max_base_connections(&self) -> usize {
        self.max_base_connections.get()
    }

    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the neighbour bound that applies at `level`.
    #[must_use]
    pub fn max_connections_for(&self, level: usize) -> usize {
        self.bound_for(level).get()
    }

    pub(crate) fn bound_for(&self, level: usize) -> NonZeroUsize {
        if level == 0 {
            self.max_base_connections
        } else {
            self.max_connections
        }
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONNECTIONS, DEFAULT_MAX_BASE_CONNECTIONS)
            .expect("default parameters must be valid")
            .with_initial_capacity(DEFAULT_INITIAL_CAPACITY)
    }
}
