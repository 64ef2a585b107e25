use strata_layout::graphlib::GraphOptions;
use strata_layout::order::{self, Relationship};
use strata_layout::{EdgeLabel, LayoutGraph, NodeLabel};

fn ranked(rank: i32) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        ..Default::default()
    }
}

fn new_graph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions { multigraph: true })
}

fn layers(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect()
}

#[test]
fn cross_count_counts_a_single_crossing() {
    let mut g = new_graph();
    g.set_edge("a", "d");
    g.set_edge("b", "c");
    assert_eq!(order::cross_count(&g, &layers(&[&["a", "b"], &["c", "d"]])), 1.0);
    assert_eq!(order::cross_count(&g, &layers(&[&["a", "b"], &["d", "c"]])), 0.0);
}

#[test]
fn cross_count_weights_crossings() {
    let mut g = new_graph();
    g.set_edge_with_label(
        "a",
        "d",
        EdgeLabel {
            weight: 2.0,
            ..Default::default()
        },
    );
    g.set_edge_with_label(
        "b",
        "c",
        EdgeLabel {
            weight: 3.0,
            ..Default::default()
        },
    );
    assert_eq!(order::cross_count(&g, &layers(&[&["a", "b"], &["c", "d"]])), 6.0);
}

#[test]
fn init_order_walks_depth_first_in_insertion_order() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(1));
    g.set_node("c", ranked(1));
    g.set_node("d", ranked(0));
    g.set_edge("a", "c");
    g.set_edge("d", "b");

    assert_eq!(order::init_order(&g), layers(&[&["a", "d"], &["c", "b"]]));
}

#[test]
fn barycenter_is_the_weighted_mean_of_neighbor_positions() {
    let mut g = new_graph();
    g.set_edge("a", "x");
    g.set_edge_with_label(
        "b",
        "x",
        EdgeLabel {
            weight: 3.0,
            ..Default::default()
        },
    );
    g.set_node("y", NodeLabel::default());
    let fixed: rustc_hash::FxHashMap<String, usize> = [("a".to_string(), 0), ("b".to_string(), 2)]
        .into_iter()
        .collect();

    let entries = order::barycenter(
        &g,
        &["x".to_string(), "y".to_string()],
        &fixed,
        Relationship::InEdges,
    );
    assert_eq!(entries[0].barycenter, Some(1.5));
    assert_eq!(entries[0].weight, 4.0);
    assert_eq!(entries[1].barycenter, None);
}

#[test]
fn sort_layer_is_stable_for_equal_keys() {
    let entries = vec![
        order::BarycenterEntry {
            v: "p".to_string(),
            barycenter: Some(1.0),
            weight: 1.0,
        },
        order::BarycenterEntry {
            v: "q".to_string(),
            barycenter: Some(1.0),
            weight: 1.0,
        },
        order::BarycenterEntry {
            v: "r".to_string(),
            barycenter: Some(0.0),
            weight: 1.0,
        },
    ];
    assert_eq!(order::sort_layer(&entries), vec!["r", "p", "q"]);
}

#[test]
fn order_removes_an_avoidable_crossing() {
    let mut g = new_graph();
    g.set_node("a", ranked(0));
    g.set_node("b", ranked(0));
    g.set_node("c", ranked(1));
    g.set_node("d", ranked(1));
    g.set_node("e", ranked(1));
    g.set_edge("a", "c");
    g.set_edge("a", "e");
    g.set_edge("b", "d");
    g.set_edge("b", "c");

    let initial = order::init_order(&g);
    assert_eq!(order::cross_count(&g, &initial), 1.0);

    order::order(&mut g);
    let order_of = |v: &str| g.node(v).and_then(|n| n.order);
    assert_eq!(order_of("a"), Some(0));
    assert_eq!(order_of("b"), Some(1));
    assert_eq!(order_of("e"), Some(0));
    assert_eq!(order_of("c"), Some(1));
    assert_eq!(order_of("d"), Some(2));
}
