//! Reader/writer access to a graph shared between threads.
//!
//! Searches take the shared lock and may run side by side. Structural growth
//! and edge wiring take the exclusive lock, so a reader never observes a table
//! mid-resize.

use std::sync::{Arc, RwLock};

use crate::error::GraphError;

use super::core::HnswGraph;

const GRAPH_RESOURCE: &str = "graph";

/// Cloneable handle to an [`HnswGraph`] guarded by an [`RwLock`].
///
/// # Examples
/// ```
/// use kaiso_core::{HnswGraph, SharedHnswGraph};
///
/// let shared = SharedHnswGraph::new(HnswGraph::new(4, 8, 4).expect("valid bounds"));
/// shared
///     .write(|graph| graph.ensure_neighbour_list(0, 1).map(|list| list.add_if_absent(2)))
///     .expect("lock must not be poisoned")
///     .expect("node 1 fits");
/// let degree = shared
///     .read(|graph| graph.neighbour_list(0, 1).map(|list| list.map_or(0, |l| l.len())))
///     .expect("lock must not be poisoned")
///     .expect("node 1 fits");
/// assert_eq!(degree, 1);
/// ```
#[derive(Clone, Debug)]
pub struct SharedHnswGraph {
    inner: Arc<RwLock<HnswGraph>>,
}

impl SharedHnswGraph {
    #[must_use]
    pub fn new(graph: HnswGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Runs `f` under the shared lock.
    ///
    /// # Errors
    /// Returns [`GraphError::LockPoisoned`] when a writer panicked while
    /// holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&HnswGraph) -> R) -> Result<R, GraphError> {
        let guard = self.inner.read().map_err(|_| GraphError::LockPoisoned {
            resource: GRAPH_RESOURCE,
        })?;
        Ok(f(&guard))
    }

    /// Runs `f` under the exclusive lock.
    ///
    /// # Errors
    /// Returns [`GraphError::LockPoisoned`] when a writer panicked while
    /// holding the lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut HnswGraph) -> R) -> Result<R, GraphError> {
        let mut guard = self.inner.write().map_err(|_| GraphError::LockPoisoned {
            resource: GRAPH_RESOURCE,
        })?;
        Ok(f(&mut guard))
    }

    /// Consumes the handle and returns the graph when no other clone exists.
    ///
    /// A poisoned lock still yields the graph it guards.
    ///
    /// # Errors
    /// Returns the handle unchanged while other clones are alive.
    pub fn try_unwrap(self) -> Result<HnswGraph, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock
                .into_inner()
                .unwrap_or_else(std::sync::PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl From<HnswGraph> for SharedHnswGraph {
    fn from(graph: HnswGraph) -> Self {
        Self::new(graph)
    }
}
