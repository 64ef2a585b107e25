use strata_graphlib::{EdgeKey, Graph, GraphOptions};

fn multigraph() -> Graph<i32, i32, ()> {
    Graph::new(GraphOptions { multigraph: true })
}

#[test]
fn set_node_keeps_insertion_order_and_replaces_labels() {
    let mut g = multigraph();
    g.set_node("b", 1);
    g.set_node("a", 2);
    g.set_node("b", 3);

    assert_eq!(g.node_ids(), vec!["b".to_string(), "a".to_string()]);
    assert_eq!(g.node("b"), Some(&3));
    assert_eq!(g.node_ix("a"), Some(1));
}

#[test]
fn set_edge_creates_missing_endpoints() {
    let mut g = multigraph();
    g.set_edge("a", "b");

    assert!(g.has_node("a"));
    assert!(g.has_node("b"));
    assert_eq!(g.node("a"), Some(&0));
    assert!(g.has_edge("a", "b", None));
    assert!(!g.has_edge("b", "a", None));
}

#[test]
fn multigraph_keeps_named_parallel_edges_apart() {
    let mut g = multigraph();
    g.set_edge_named("a", "b", Some("x"), Some(1));
    g.set_edge_named("a", "b", Some("y"), Some(2));
    g.set_edge_named("a", "b", None::<String>, Some(3));

    assert_eq!(g.edge_count(), 3);
    assert_eq!(g.edge("a", "b", Some("y")), Some(&2));
    assert_eq!(g.out_edges("a", Some("b")).len(), 3);
}

#[test]
fn simple_graph_collapses_parallel_edges() {
    let mut g: Graph<(), i32, ()> = Graph::new(GraphOptions::default());
    g.set_edge_named("a", "b", Some("x"), Some(1));
    g.set_edge_named("a", "b", Some("y"), Some(2));

    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge("a", "b", Some("anything")), Some(&2));
}

#[test]
fn adjacency_follows_mutations() {
    let mut g = multigraph();
    g.set_path(&["a", "b", "c"]);
    assert_eq!(g.successors("a"), vec!["b"]);
    assert_eq!(g.predecessors("c"), vec!["b"]);

    g.set_edge("a", "c");
    assert_eq!(g.successors("a"), vec!["b", "c"]);
    assert_eq!(g.predecessors("c"), vec!["b", "a"]);

    assert_eq!(g.take_edge(&EdgeKey::new("a", "b", None::<String>)), Some(0));
    assert_eq!(g.successors("a"), vec!["c"]);
    assert!(g.predecessors("b").is_empty());
}

#[test]
fn take_edge_returns_the_label() {
    let mut g = multigraph();
    g.set_edge_named("a", "b", Some("e"), Some(7));

    let key = EdgeKey::new("a", "b", Some("e"));
    assert_eq!(g.take_edge(&key), Some(7));
    assert_eq!(g.take_edge(&key), None);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn remove_node_cascades_to_incident_edges() {
    let mut g = multigraph();
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "c");

    assert!(g.remove_node("b"));
    assert!(!g.remove_node("b"));
    assert_eq!(g.node_ids(), vec!["a".to_string(), "c".to_string()]);
    assert_eq!(g.edge_count(), 1);
    assert!(g.has_edge("a", "c", None));
    assert_eq!(g.node_ix("c"), Some(1));
    assert_eq!(g.predecessors("c"), vec!["a"]);
}

#[test]
fn node_edges_do_not_repeat_self_loops() {
    let mut g = multigraph();
    g.set_edge("a", "b");
    g.set_edge("b", "a");
    g.set_edge("a", "a");

    assert_eq!(g.node_edges("a").len(), 3);
}

#[test]
fn cloned_graph_is_independent() {
    let mut g = multigraph();
    g.set_path(&["a", "b"]);
    let mut copy = g.clone();
    copy.set_edge("b", "c");

    assert_eq!(g.successors("b"), Vec::<&str>::new());
    assert_eq!(copy.successors("b"), vec!["c"]);
}
