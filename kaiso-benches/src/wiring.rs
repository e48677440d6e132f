//! Seeded insertion driver that exercises the graph the way an HNSW builder
//! does, without vectors or distances.
//!
//! Each node draws a top level, joins every level up to it, and links to
//! random peers already present on that level. A full peer list evicts one
//! neighbour before accepting the new node.

use kaiso_core::{GraphError, GraphParams, HnswGraph};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Shape of a synthetic graph build.
#[derive(Clone, Copy, Debug)]
pub struct WiringConfig {
    /// Number of nodes inserted, with identifiers `0..node_count`.
    pub node_count: usize,
    /// Neighbour bound above level 0 (M).
    pub max_connections: usize,
    /// Neighbour bound on level 0.
    pub max_base_connections: usize,
    /// Highest level a node may be promoted to.
    pub max_level: usize,
    /// Node slots allocated before the first insertion.
    pub initial_capacity: usize,
    /// Seed for level sampling and peer selection.
    pub seed: u64,
}

impl WiringConfig {
    /// Builds a configuration with `M0 = 2 * M`, eight levels at most and a
    /// single initial slot, so growth happens during the build.
    #[must_use]
    pub const fn new(node_count: usize, max_connections: usize, seed: u64) -> Self {
        Self {
            node_count,
            max_connections,
            max_base_connections: max_connections.saturating_mul(2),
            max_level: 8,
            initial_capacity: 1,
            seed,
        }
    }
}

/// Result of a synthetic build.
#[derive(Debug)]
pub struct WiringOutcome {
    /// The wired graph.
    pub graph: HnswGraph,
    /// Number of neighbours evicted to make room for reverse edges.
    pub evictions: usize,
}

/// Deterministic insertion driver over [`HnswGraph`].
#[derive(Clone, Debug)]
pub struct SyntheticWiring {
    config: WiringConfig,
    params: GraphParams,
}

impl SyntheticWiring {
    /// Validates `config` and prepares a driver.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when `node_count` is zero and
    /// [`BenchSetupError::Graph`] when either neighbour bound is zero.
    pub fn new(config: WiringConfig) -> Result<Self, BenchSetupError> {
        if config.node_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "node_count",
            });
        }
        let params = GraphParams::new(config.max_connections, config.max_base_connections)?
            .with_initial_capacity(config.initial_capacity);
        Ok(Self { config, params })
    }

    /// Returns the validated configuration.
    #[must_use]
    pub const fn config(&self) -> &WiringConfig {
        &self.config
    }

    /// Inserts every node and returns the wired graph.
    ///
    /// Two builds from the same configuration produce identical graphs.
    ///
    /// # Errors
    /// Returns [`GraphError`] when the graph rejects an operation, which
    /// indicates a defect in the driver or the storage.
    pub fn build(&self) -> Result<WiringOutcome, GraphError> {
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut graph = HnswGraph::with_params(self.params);
        let mut members: Vec<Vec<usize>> = Vec::new();
        let mut evictions = 0;

        for node in 0..self.config.node_count {
            graph.ensure_node_capacity(node + 1);
            let top = self.sample_level(&mut rng);
            graph.ensure_neighbour_list(top, node)?;
            graph.set_level_of_node(node, top)?;

            for level in 0..=top {
                graph.ensure_neighbour_list(level, node)?;
                let Some(peers) = members.get(level).filter(|peers| !peers.is_empty()) else {
                    continue;
                };
                for _ in 0..graph.max_connections_for(level) {
                    let pick = rng.gen_range(0..peers.len());
                    if let Some(&peer) = peers.get(pick) {
                        evictions += link(&mut graph, level, node, peer)?;
                    }
                }
            }

            if members.len() <= top {
                members.resize_with(top + 1, Vec::new);
            }
            for level_members in members.iter_mut().take(top + 1) {
                level_members.push(node);
            }
        }

        Ok(WiringOutcome { graph, evictions })
    }

    /// Draws a top level: each promotion succeeds with probability `1 / M`.
    fn sample_level(&self, rng: &mut SmallRng) -> usize {
        let odds = self.params.max_connections();
        let mut level = 0;
        while level < self.config.max_level && rng.gen_range(0..odds) == 0 {
            level += 1;
        }
        level
    }
}

/// Adds `node -> peer` and `peer -> node`, returning the number of evictions.
fn link(
    graph: &mut HnswGraph,
    level: usize,
    node: usize,
    peer: usize,
) -> Result<usize, GraphError> {
    if !graph.ensure_neighbour_list(level, node)?.add_if_absent(peer) {
        return Ok(0);
    }
    let reverse = graph.ensure_neighbour_list(level, peer)?;
    let mut evicted = 0;
    if reverse.is_full() && !reverse.contains(node) {
        let victim = reverse.as_slice().first().copied();
        if let Some(victim) = victim {
            reverse.remove_if_present(victim);
            evicted = 1;
        }
    }
    reverse.add_if_absent(node);
    Ok(evicted)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{SyntheticWiring, WiringConfig};
    use crate::error::BenchSetupError;

    fn build(config: WiringConfig) -> super::WiringOutcome {
        SyntheticWiring::new(config)
            .expect("config must be valid")
            .build()
            .expect("build must succeed")
    }

    #[rstest]
    fn builds_are_deterministic() {
        let config = WiringConfig::new(200, 4, 7);
        let first = build(config);
        let second = build(config);

        assert_eq!(first.evictions, second.evictions);
        let snapshot = |graph: &kaiso_core::HnswGraph| -> Vec<_> {
            graph
                .adjacency()
                .map(|(level, node, list)| (level, node, list.to_sorted_vec()))
                .collect()
        };
        assert_eq!(snapshot(&first.graph), snapshot(&second.graph));
    }

    #[rstest]
    #[case(1, 2)]
    #[case(64, 2)]
    #[case(300, 6)]
    fn wired_graphs_are_well_formed(#[case] node_count: usize, #[case] max_connections: usize) {
        let outcome = build(WiringConfig::new(node_count, max_connections, 42));
        let graph = outcome.graph;

        assert!(graph.node_capacity() >= node_count);
        assert_eq!(graph.level_population(0), Ok(node_count));
        assert_eq!(graph.assigned_nodes().count(), node_count);
        assert_eq!(graph.invariants().check_all(), Ok(()));
    }

    #[rstest]
    fn dense_wiring_evicts() {
        let outcome = build(WiringConfig::new(100, 2, 3));
        assert!(outcome.evictions > 0);
        assert!(outcome.graph.total_edges() > 0);
    }

    #[rstest]
    fn zero_nodes_are_rejected() {
        let err = SyntheticWiring::new(WiringConfig::new(0, 4, 1))
            .expect_err("empty builds must be rejected");
        assert!(matches!(
            err,
            BenchSetupError::ZeroValue {
                context: "node_count"
            }
        ));
    }

    #[rstest]
    fn zero_bounds_are_rejected() {
        let err = SyntheticWiring::new(WiringConfig::new(10, 0, 1))
            .expect_err("zero bounds must be rejected");
        assert!(matches!(err, BenchSetupError::Graph(_)));
    }
}
