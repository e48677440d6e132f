//! Node capacity and level count growth.

use rstest::{fixture, rstest};

use crate::{GraphError, HnswGraph, NeighbourList};

#[fixture]
fn wired() -> HnswGraph {
    let mut graph = HnswGraph::new(2, 3, 4).expect("params must be valid");
    for (level, node, neighbour) in [(0, 0, 3), (0, 3, 0), (1, 0, 1), (2, 0, 2)] {
        graph
            .ensure_neighbour_list(level, node)
            .expect("node fits")
            .add_if_absent(neighbour);
    }
    graph.set_level_of_node(0, 2).expect("level 2 is allocated");
    graph.set_level_of_node(3, 0).expect("level 0 is allocated");
    graph
}

#[rstest]
fn smaller_capacity_is_a_no_op() {
    let mut graph = HnswGraph::new(2, 3, 8).expect("params must be valid");
    graph.ensure_node_capacity(3);
    graph.ensure_node_capacity(8);
    assert_eq!(graph.node_capacity(), 8);
}

#[rstest]
#[case(4, 5, 8)]
#[case(4, 10, 10)]
#[case(0, 3, 3)]
#[case(1, 2, 2)]
fn growth_is_geometric(#[case] initial: usize, #[case] requested: usize, #[case] expected: usize) {
    let mut graph = HnswGraph::new(2, 3, initial).expect("params must be valid");
    graph.ensure_node_capacity(requested);
    assert_eq!(graph.node_capacity(), expected);
}

#[rstest]
fn growth_resizes_every_level(mut wired: HnswGraph) {
    wired.ensure_node_capacity(20);
    let capacity = wired.node_capacity();
    assert_eq!(wired.table_lengths(), vec![capacity; wired.level_count()]);
}

#[rstest]
fn growth_preserves_levels_and_lists(mut wired: HnswGraph) {
    let before: Vec<(usize, usize, NeighbourList)> = wired
        .adjacency()
        .map(|(level, node, list)| (level, node, list.clone()))
        .collect();
    let levels_before: Vec<_> = wired.assigned_nodes().collect();

    wired.ensure_node_capacity(100);

    let after: Vec<(usize, usize, NeighbourList)> = wired
        .adjacency()
        .map(|(level, node, list)| (level, node, list.clone()))
        .collect();
    assert_eq!(before, after);
    assert_eq!(levels_before, wired.assigned_nodes().collect::<Vec<_>>());
    for node in 4..wired.node_capacity() {
        assert_eq!(wired.level_of_node(node), Ok(None));
        for level in 0..wired.level_count() {
            assert_eq!(wired.neighbour_list(level, node), Ok(None));
        }
    }
}

#[rstest]
fn growth_keeps_list_addresses(mut wired: HnswGraph) {
    let address = |graph: &HnswGraph, level: usize, node: usize| {
        graph
            .neighbour_list(level, node)
            .expect("node fits")
            .map(std::ptr::from_ref)
            .expect("list exists")
    };
    let base = address(&wired, 0, 0);
    let upper = address(&wired, 2, 0);

    wired.ensure_node_capacity(1_000);
    wired
        .ensure_neighbour_list(5, 999)
        .expect("node 999 fits")
        .add_if_absent(0);

    assert!(std::ptr::eq(base, address(&wired, 0, 0)));
    assert!(std::ptr::eq(upper, address(&wired, 2, 0)));
}

#[rstest]
fn repeated_requests_return_the_same_list(mut wired: HnswGraph) {
    let first = std::ptr::from_mut(wired.ensure_neighbour_list(1, 0).expect("node fits"));
    let second = std::ptr::from_mut(wired.ensure_neighbour_list(1, 0).expect("node fits"));
    assert!(std::ptr::eq(first, second));
    assert_eq!(
        wired
            .ensure_neighbour_list(1, 0)
            .expect("node fits")
            .as_slice(),
        &[1]
    );
}

#[rstest]
fn level_requests_allocate_every_missing_level() {
    let mut graph = HnswGraph::new(2, 3, 2).expect("params must be valid");
    graph.ensure_neighbour_list(4, 1).expect("node 1 fits");
    assert_eq!(graph.level_count(), 5);
    for level in 1..4 {
        assert_eq!(graph.level_population(level), Ok(0));
    }
    assert_eq!(graph.level_population(4), Ok(1));
}

#[rstest]
fn level_count_never_shrinks(mut wired: HnswGraph) {
    let before = wired.level_count();
    wired.ensure_neighbour_list(0, 1).expect("node fits");
    wired.ensure_neighbour_list(1, 1).expect("node fits");
    assert_eq!(wired.level_count(), before);
}

#[rstest]
fn level_assignment_never_grows_level_count() {
    let mut graph = HnswGraph::new(2, 3, 2).expect("params must be valid");
    assert_eq!(
        graph.set_level_of_node(1, 3),
        Err(GraphError::LevelOutOfRange {
            level: 3,
            level_count: 1,
        })
    );
    assert_eq!(graph.level_count(), 1);
    assert_eq!(graph.level_of_node(1), Ok(None));

    graph.ensure_neighbour_list(3, 1).expect("node 1 fits");
    graph.set_level_of_node(1, 3).expect("level 3 is allocated");
    assert_eq!(graph.level_count(), 4);
    assert_eq!(graph.level_of_node(1), Ok(Some(3)));
}

#[rstest]
#[case::base_level(0, 4, 8)]
#[case::upper_level(3, 9, 10)]
#[case::far_beyond(1, 40, 41)]
fn list_request_grows_node_capacity(
    #[case] level: usize,
    #[case] node: usize,
    #[case] expected: usize,
) {
    let mut graph = HnswGraph::new(2, 3, 4).expect("params must be valid");
    let capacity = graph
        .ensure_neighbour_list(level, node)
        .expect("ids are representable")
        .capacity();
    assert_eq!(capacity, graph.max_connections_for(level));
    assert_eq!(graph.node_capacity(), expected);
    assert_eq!(graph.table_lengths(), vec![expected; graph.level_count()]);
}

#[rstest]
fn implicit_growth_keeps_lists_and_addresses(mut wired: HnswGraph) {
    let before: Vec<(usize, usize, NeighbourList, *const NeighbourList)> = wired
        .adjacency()
        .map(|(level, node, list)| (level, node, list.clone(), std::ptr::from_ref(list)))
        .collect();
    let levels_before: Vec<_> = wired.assigned_nodes().collect();

    wired
        .ensure_neighbour_list(1, 500)
        .expect("node 500 is representable")
        .add_if_absent(0);
    assert!(wired.node_capacity() > 500);

    for (level, node, contents, address) in before {
        let list = wired
            .neighbour_list(level, node)
            .expect("node fits")
            .expect("list survives growth");
        assert_eq!(list, &contents);
        assert!(std::ptr::eq(std::ptr::from_ref(list), address));
    }
    assert_eq!(levels_before, wired.assigned_nodes().collect::<Vec<_>>());
    assert_eq!(wired.level_of_node(500), Ok(None));
}
