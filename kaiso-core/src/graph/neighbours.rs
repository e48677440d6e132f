//! Bounded neighbour storage for a single (level, node) adjacency slot.

use std::num::NonZeroUsize;

use crate::error::GraphError;

/// Fixed-capacity, duplicate-free set of neighbour identifiers.
///
/// The capacity is chosen when the list is created and never changes. A full
/// list rejects new identifiers instead of evicting; callers that want to
/// replace a neighbour remove it first with
/// [`remove_if_present`](Self::remove_if_present).
///
/// Iteration order is unspecified and may change after a removal. Callers
/// needing determinism should use [`to_sorted_vec`](Self::to_sorted_vec).
///
/// # Examples
/// ```
/// use kaiso_core::NeighbourList;
///
/// let mut list = NeighbourList::new(2).expect("capacity must be positive");
/// assert!(list.add_if_absent(7));
/// assert!(!list.add_if_absent(7));
/// assert!(list.add_if_absent(11));
/// assert!(!list.add_if_absent(3));
/// assert_eq!(list.len(), 2);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NeighbourList {
    ids: Vec<usize>,
    capacity: NonZeroUsize,
}

impl NeighbourList {
    /// Creates an empty list holding at most `capacity` neighbours.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, GraphError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| GraphError::InvalidParameters {
            reason: "neighbour list capacity must be greater than zero".into(),
        })?;
        Ok(Self::with_capacity(capacity))
    }

    /// Creates an empty list from a capacity that is already known to be
    /// positive.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Inserts `id` when it is absent and the list has room.
    ///
    /// Returns `false` without mutating the list when `id` is already present
    /// or when the list is full.
    pub fn add_if_absent(&mut self, id: usize) -> bool {
        if self.is_full() || self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id` when present, freeing one slot.
    pub fn remove_if_present(&mut self, id: usize) -> bool {
        match self.ids.iter().position(|&existing| existing == id) {
            Some(position) => {
                self.ids.swap_remove(position);
                true
            }
            None => false,
        }
    }

    /// Returns `true` when `id` is stored in the list.
    #[must_use]
    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    /// Returns the number of stored neighbours.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when the list holds no neighbours.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the fixed maximum number of neighbours.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns `true` when no further neighbour can be added without a
    /// removal.
    #[must_use]
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity.get()
    }

    /// Iterates over the stored identifiers in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.ids.iter().copied()
    }

    /// Borrows the stored identifiers in unspecified order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.ids
    }

    /// Returns the stored identifiers in ascending order.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<usize> {
        let mut ids = self.ids.clone();
        ids.sort_unstable();
        ids
    }
}
