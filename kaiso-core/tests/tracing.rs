//! Tests for the diagnostics emitted while the graph grows.

use kaiso_core::HnswGraph;
use kaiso_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn record<R>(f: impl FnOnce() -> R) -> (R, RecordingLayer) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, layer)
}

#[rstest]
fn capacity_growth_is_logged_once_per_resize() {
    let mut graph = HnswGraph::new(2, 4, 4).expect("params must be valid");
    let ((), layer) = record(|| {
        graph.ensure_node_capacity(3);
        graph.ensure_node_capacity(5);
        graph.ensure_node_capacity(6);
    });

    let events = layer.events_with_message("grew node capacity");
    assert_eq!(events.len(), 1);
    let event = events.first().expect("one growth event");
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.field("from"), Some("4"));
    assert_eq!(event.field("to"), Some("8"));
    assert_eq!(event.field("levels"), Some("1"));

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "graph.grow_node_tables")
        .expect("graph.grow_node_tables span must exist");
    assert_eq!(span.fields.get("capacity"), Some(&"8".to_owned()));
}

#[rstest]
fn level_growth_reports_old_and_new_counts() {
    let mut graph = HnswGraph::new(2, 4, 2).expect("params must be valid");
    let (result, layer) = record(|| {
        graph.ensure_neighbour_list(3, 1).map(|list| list.capacity())
    });
    assert_eq!(result, Ok(2));

    let events = layer.events_with_message("grew level count");
    assert_eq!(events.len(), 1);
    let event = events.first().expect("one level event");
    assert_eq!(event.field("from"), Some("1"));
    assert_eq!(event.field("to"), Some("4"));
}

#[rstest]
fn list_allocation_is_traced_only_on_creation() {
    let mut graph = HnswGraph::new(2, 4, 2).expect("params must be valid");
    let ((), layer) = record(|| {
        for _ in 0..3 {
            graph.ensure_neighbour_list(0, 1).expect("node 1 fits");
        }
    });

    let events = layer.events_with_message("allocated neighbour list");
    assert_eq!(events.len(), 1);
    let event = events.first().expect("one allocation event");
    assert_eq!(event.level, Level::TRACE);
    assert_eq!(event.field("level"), Some("0"));
    assert_eq!(event.field("node"), Some("1"));
    assert_eq!(event.field("capacity"), Some("4"));
}

#[rstest]
fn invariant_violations_are_logged() {
    let mut graph = HnswGraph::new(2, 4, 2).expect("params must be valid");
    graph
        .ensure_neighbour_list(0, 0)
        .expect("node 0 fits")
        .add_if_absent(1);
    let (violations, layer) = record(|| graph.invariants().collect_all());

    assert_eq!(violations.len(), 1);
    let events = layer.events_with_message("graph invariant violated");
    assert_eq!(events.len(), 1);
    assert_eq!(
        events.first().and_then(|event| event.field("violation")),
        Some(violations.first().expect("one violation").to_string().as_str())
    );
}
