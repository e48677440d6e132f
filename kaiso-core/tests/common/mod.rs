use kaiso_core::{HnswGraph, Result};

/// Minimal insertion driver standing in for a real HNSW builder.
///
/// Nodes are inserted in identifier order and linked bidirectionally to every
/// earlier node that shares a level, while both lists have room.
pub struct Wiring {
    graph: HnswGraph,
    next: usize,
}

impl Wiring {
    pub fn new(graph: HnswGraph) -> Self {
        Self { graph, next: 0 }
    }

    pub fn insert(&mut self, top: usize) -> Result<usize> {
        let node = self.next;
        self.graph.ensure_node_capacity(node + 1);
        self.graph.ensure_neighbour_list(top, node)?;
        self.graph.set_level_of_node(node, top)?;
        for level in 0..=top {
            self.graph.ensure_neighbour_list(level, node)?;
            for peer in 0..node {
                let peer_top = self.graph.level_of_node(peer)?;
                if peer_top.is_none_or(|peer_top| peer_top < level) {
                    continue;
                }
                self.link(level, node, peer)?;
            }
        }
        self.next += 1;
        Ok(node)
    }

    fn link(&mut self, level: usize, a: usize, b: usize) -> Result<()> {
        let a_full = self.graph.ensure_neighbour_list(level, a)?.is_full();
        let b_full = self.graph.ensure_neighbour_list(level, b)?.is_full();
        if a_full || b_full {
            return Ok(());
        }
        self.graph.ensure_neighbour_list(level, a)?.add_if_absent(b);
        self.graph.ensure_neighbour_list(level, b)?.add_if_absent(a);
        Ok(())
    }

    pub fn graph(&self) -> &HnswGraph {
        &self.graph
    }

    pub fn into_graph(self) -> HnswGraph {
        self.graph
    }
}
