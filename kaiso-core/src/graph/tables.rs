//! Dense node-indexed tables backing [`HnswGraph`](super::HnswGraph).
//!
//! Both tables are indexed by node identifier and only ever grow. Neighbour
//! lists are boxed so that resizing a table relocates the slot array but never
//! the lists it points at.

use std::num::NonZeroUsize;

use super::neighbours::NeighbourList;

/// Top level assigned to each node, `None` for nodes not yet in the graph.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeLevelTable {
    levels: Vec<Option<usize>>,
}

impl NodeLevelTable {
    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            levels: vec![None; len],
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `None` when `node` is outside the table, otherwise the slot.
    #[inline]
    pub(crate) fn get(&self, node: usize) -> Option<Option<usize>> {
        self.levels.get(node).copied()
    }

    pub(crate) fn slot_mut(&mut self, node: usize) -> Option<&mut Option<usize>> {
        self.levels.get_mut(node)
    }

    pub(crate) fn grow_to(&mut self, len: usize) {
        debug_assert!(len >= self.levels.len(), "level tables never shrink");
        self.levels.resize(len, None);
    }

    pub(crate) fn assigned(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(node, level)| level.map(|top| (node, top)))
    }
}

/// Lazily populated neighbour lists for every node on one level.
#[derive(Clone, Debug)]
pub(crate) struct AdjacencyTable {
    bound: NonZeroUsize,
    slots: Vec<Option<Box<NeighbourList>>>,
}

impl AdjacencyTable {
    pub(crate) fn with_len(bound: NonZeroUsize, len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { bound, slots }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn get(&self, node: usize) -> Option<&NeighbourList> {
        self.slots.get(node).and_then(Option::as_deref)
    }

    /// Returns the list for `node`, creating it when absent.
    ///
    /// The flag reports whether a new list was allocated. Returns `None` when
    /// `node` lies outside the table.
    pub(crate) fn get_or_create(&mut self, node: usize) -> Option<(&mut NeighbourList, bool)> {
        let bound = self.bound;
        let slot = self.slots.get_mut(node)?;
        let created = slot.is_none();
        let list: &mut NeighbourList =
            slot.get_or_insert_with(|| Box::new(NeighbourList::with_capacity(bound)));
        Some((list, created))
    }

    pub(crate) fn grow_to(&mut self, len: usize) {
        debug_assert!(len >= self.slots.len(), "adjacency tables never shrink");
        self.slots.resize_with(len, || None);
    }

    pub(crate) fn lists(&self) -> impl Iterator<Item = (usize, &NeighbourList)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(node, slot)| slot.as_deref().map(|list| (node, list)))
    }

    #[cfg(test)]
    pub(crate) fn replace_for_test(&mut self, node: usize, list: NeighbourList) {
        if let Some(slot) = self.slots.get_mut(node) {
            *slot = Some(Box::new(list));
        }
    }

    pub(crate) fn population(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
