use strata_layout::graphlib::GraphOptions;
use strata_layout::{Dummy, EdgeLabel, LayoutGraph, NodeLabel, Point, normalize};

fn ranked(rank: i32) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        ..Default::default()
    }
}

fn new_graph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions { multigraph: true })
}

#[test]
fn normalize_keeps_short_edges() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(1));
    g.set_edge("a", "b");

    normalize::run(&mut g);
    assert_eq!(g.node_count(), 2);
    assert!(g.has_edge("a", "b", None));
    assert!(g.graph().dummy_chains.is_empty());
}

#[test]
fn normalize_splits_a_long_edge_into_a_dummy_chain() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(3));
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            weight: 2.0,
            ..Default::default()
        },
    );

    normalize::run(&mut g);
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 3);
    assert!(!g.has_edge("a", "b", None));
    assert_eq!(g.graph().dummy_chains, vec!["_d2".to_string()]);
    assert_eq!(g.successors("a"), vec!["_d2"]);
    assert_eq!(g.successors("_d2"), vec!["_d3"]);
    assert_eq!(g.successors("_d3"), vec!["b"]);

    for id in ["_d2", "_d3"] {
        let node = g.node(id).cloned().unwrap_or_default();
        assert_eq!(node.dummy, Some(Dummy::Edge));
        assert_eq!(node.width, 0.0);
    }
    assert_eq!(g.node("_d3").and_then(|n| n.rank), Some(2));
    assert!(g.edges().all(|e| g.edge_by_key(e).map(|l| l.weight) == Some(2.0)));
}

#[test]
fn normalize_places_the_label_box_on_its_label_rank() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(2));
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            width: 30.0,
            height: 10.0,
            label_rank: Some(1),
            ..Default::default()
        },
    );

    normalize::run(&mut g);
    let dummy = g.node("_d2").cloned().unwrap_or_default();
    assert_eq!(dummy.dummy, Some(Dummy::EdgeLabel));
    assert_eq!(dummy.width, 30.0);
    assert_eq!(dummy.height, 10.0);
}

#[test]
fn normalize_undo_collects_points_and_label_anchor() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(3));
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            width: 20.0,
            height: 8.0,
            label_rank: Some(2),
            ..Default::default()
        },
    );

    normalize::run(&mut g);
    for (id, x, y) in [("_d2", 5.0, 10.0), ("_d3", 15.0, 20.0)] {
        if let Some(n) = g.node_mut(id) {
            n.x = Some(x);
            n.y = Some(y);
        }
    }
    normalize::undo(&mut g);

    assert_eq!(g.node_count(), 2);
    let label = g.edge("a", "b", None).cloned().unwrap_or_default();
    assert_eq!(
        label.points,
        vec![Point { x: 5.0, y: 10.0 }, Point { x: 15.0, y: 20.0 }]
    );
    assert_eq!((label.x, label.y), (Some(15.0), Some(20.0)));
    assert_eq!((label.width, label.height), (20.0, 8.0));
}
