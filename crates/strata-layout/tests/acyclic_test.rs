use strata_layout::acyclic;
use strata_layout::graphlib::{GraphOptions, alg};
use strata_layout::{EdgeLabel, LayoutGraph};

fn new_graph() -> LayoutGraph {
    LayoutGraph::new(GraphOptions { multigraph: true })
}

fn edge_triples(g: &LayoutGraph) -> Vec<(String, String, Option<String>)> {
    let mut edges: Vec<(String, String, Option<String>)> = g
        .edges()
        .map(|e| (e.v.clone(), e.w.clone(), e.name.clone()))
        .collect();
    edges.sort();
    edges
}

#[test]
fn acyclic_run_leaves_a_dag_untouched() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "d"]);
    g.set_path(&["a", "c", "d"]);
    let before = edge_triples(&g);

    acyclic::run(&mut g);
    assert_eq!(edge_triples(&g), before);
    assert!(g.edges().all(|e| !g.edge_by_key(e).is_some_and(|l| l.feedback)));
}

#[test]
fn acyclic_run_reverses_one_edge_of_a_three_cycle() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c", "a"]);

    acyclic::run(&mut g);
    assert!(alg::find_cycles(&g).is_empty());
    assert_eq!(
        edge_triples(&g),
        vec![
            ("a".to_string(), "b".to_string(), None),
            ("a".to_string(), "c".to_string(), Some("rev1".to_string())),
            ("b".to_string(), "c".to_string(), None),
        ]
    );
    let reversed = g.edge("a", "c", Some("rev1")).cloned().unwrap_or_default();
    assert!(reversed.reversed);
    assert!(reversed.feedback);
}

#[test]
fn acyclic_undo_restores_direction_and_keeps_feedback_flag() {
    let mut g = new_graph();
    g.set_edge_with_label(
        "a",
        "b",
        EdgeLabel {
            minlen: 2,
            weight: 3.0,
            ..Default::default()
        },
    );
    g.set_edge("b", "a");

    acyclic::run(&mut g);
    if let Some(label) = g.edge_mut("a", "b", Some("rev1")) {
        label.points = vec![
            strata_layout::Point { x: 1.0, y: 1.0 },
            strata_layout::Point { x: 2.0, y: 2.0 },
        ];
    }
    acyclic::undo(&mut g);

    assert_eq!(
        edge_triples(&g),
        vec![
            ("a".to_string(), "b".to_string(), None),
            ("b".to_string(), "a".to_string(), None),
        ]
    );
    let back = g.edge("b", "a", None).cloned().unwrap_or_default();
    assert!(!back.reversed);
    assert!(back.feedback);
    assert_eq!(back.points[0], strata_layout::Point { x: 2.0, y: 2.0 });
    assert_eq!(g.edge("a", "b", None).map(|l| l.minlen), Some(2));
}

#[test]
fn acyclic_run_ignores_self_loops() {
    let mut g = new_graph();
    g.set_edge("a", "a");
    g.set_edge("a", "b");

    acyclic::run(&mut g);
    assert!(g.has_edge("a", "a", None));
    assert!(g.has_edge("a", "b", None));
}
