use strata_graphlib::alg;
use strata_graphlib::{Graph, GraphOptions};

fn new_graph() -> Graph<(), (), ()> {
    Graph::new(GraphOptions { multigraph: true })
}

#[test]
fn topsort_releases_ready_nodes_in_insertion_order() {
    let mut g = new_graph();
    g.ensure_node("z");
    g.set_path(&["a", "c"]);
    g.set_path(&["b", "c"]);

    assert_eq!(
        alg::topsort(&g).unwrap(),
        vec!["z".to_string(), "a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn topsort_reports_nodes_stuck_on_a_cycle() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c", "b"]);

    let err = alg::topsort(&g).unwrap_err();
    assert_eq!(err.remaining, vec!["b".to_string(), "c".to_string()]);
}

#[test]
fn find_cycles_reports_sccs_and_self_loops() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "a"]);
    g.set_edge("c", "c");
    g.set_edge("c", "d");

    assert_eq!(
        alg::find_cycles(&g),
        vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ]
    );
}

#[test]
fn find_cycles_is_empty_for_a_dag() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "d"]);
    g.set_path(&["a", "c", "d"]);

    assert!(alg::find_cycles(&g).is_empty());
    assert!(alg::topsort(&g).is_ok());
}
