use strata::{
    DirectedGraph, EdgeAttrs, EdgeOptions, GraphAttrs, PositionedGraph, PositionedVertex, RankDir,
    Size, SizeProvider, VertexAttrs, VertexHandle, VertexOptions,
};

const EPS: f64 = 1e-6;

fn sized(id: &str, w: f64, h: f64) -> VertexAttrs {
    let mut attrs = VertexAttrs::with_id(id);
    attrs.layout.shape_w = Some(w);
    attrs.layout.shape_h = Some(h);
    attrs
}

fn graph_with(rank_dir: RankDir) -> DirectedGraph {
    let mut attrs = GraphAttrs::default();
    attrs.layout.rank_dir = rank_dir;
    DirectedGraph::new(attrs)
}

fn on_boundary(v: &PositionedVertex, x: f64, y: f64) -> bool {
    let dx = (x - v.x).abs();
    let dy = (y - v.y).abs();
    let inside = dx <= v.width / 2.0 + EPS && dy <= v.height / 2.0 + EPS;
    inside && ((dx - v.width / 2.0).abs() < EPS || (dy - v.height / 2.0).abs() < EPS)
}

/// A mixed graph with a cycle, a long edge, a self loop and labels.
fn sample() -> DirectedGraph {
    let mut g = DirectedGraph::default();
    let ids = ["a", "b", "c", "d", "e", "f"];
    let sizes = [
        (60.0, 30.0),
        (40.0, 40.0),
        (80.0, 20.0),
        (30.0, 30.0),
        (50.0, 25.0),
        (45.0, 35.0),
    ];
    let hs: Vec<VertexHandle> = ids
        .iter()
        .zip(sizes)
        .map(|(id, (w, h))| g.new_vertex(sized(id, w, h)).unwrap())
        .collect();
    for (s, t, label) in [
        (0, 1, None),
        (0, 2, Some("long label")),
        (0, 3, None),
        (1, 4, None),
        (2, 4, None),
        (3, 5, None),
        (1, 5, None),
        (0, 5, Some("skip")),
        (5, 0, None),
        (4, 4, None),
    ] {
        let attrs = match label {
            Some(l) => EdgeAttrs::with_label(l),
            None => EdgeAttrs::default(),
        };
        g.new_edge(hs[s], hs[t], attrs).unwrap();
    }
    g
}

#[test]
fn two_vertices_stack_along_the_rank_axis() {
    let mut g = DirectedGraph::default();
    let a = g.new_vertex(sized("A", 60.0, 30.0)).unwrap();
    let b = g.new_vertex(sized("B", 60.0, 30.0)).unwrap();
    g.new_edge(a, b, EdgeAttrs::default()).unwrap();

    let out = g.try_layout().unwrap();
    let va = out.vertex("A").unwrap();
    let vb = out.vertex("B").unwrap();
    assert!(vb.y > va.y);
    assert!((va.x - vb.x).abs() < EPS);
    assert_eq!((va.rank, vb.rank), (0, 1));

    let e = &out.edges()[0];
    assert!(e.points.len() >= 2);
    let first = e.points[0];
    let last = e.points[e.points.len() - 1];
    assert!(on_boundary(va, first.x, first.y));
    assert!(on_boundary(vb, last.x, last.y));
    assert!(!e.feedback);
}

#[test]
fn rank_direction_sets_the_rank_axis() {
    for dir in [RankDir::TB, RankDir::BT, RankDir::LR, RankDir::RL] {
        let mut g = graph_with(dir);
        let a = g.new_vertex(sized("A", 40.0, 20.0)).unwrap();
        let b = g.new_vertex(sized("B", 40.0, 20.0)).unwrap();
        g.new_edge(a, b, EdgeAttrs::default()).unwrap();
        let out = g.layout();
        assert_eq!(out.rank_dir(), dir);
        let va = out.vertex("A").unwrap();
        let vb = out.vertex("B").unwrap();
        match dir {
            RankDir::TB => assert!(vb.y > va.y),
            RankDir::BT => assert!(vb.y < va.y),
            RankDir::LR => assert!(vb.x > va.x),
            RankDir::RL => assert!(vb.x < va.x),
        }
    }
}

#[test]
fn three_cycle_reverses_one_edge_and_uses_three_ranks() {
    let mut g = DirectedGraph::default();
    let a = g.new_vertex(sized("A", 30.0, 30.0)).unwrap();
    let b = g.new_vertex(sized("B", 30.0, 30.0)).unwrap();
    let c = g.new_vertex(sized("C", 30.0, 30.0)).unwrap();
    g.new_edge(a, b, EdgeAttrs::default()).unwrap();
    g.new_edge(b, c, EdgeAttrs::default()).unwrap();
    g.new_edge(c, a, EdgeAttrs::default()).unwrap();

    let out = g.try_layout().unwrap();
    assert_eq!(out.edges().iter().filter(|e| e.feedback).count(), 1);
    let mut ranks: Vec<usize> = out.vertices().iter().map(|v| v.rank).collect();
    ranks.sort();
    assert_eq!(ranks, vec![0, 1, 2]);

    for e in out.edges() {
        let s = out.vertex(&e.source).unwrap();
        let t = out.vertex(&e.target).unwrap();
        let first = e.points[0];
        let last = e.points[e.points.len() - 1];
        assert!(on_boundary(s, first.x, first.y), "{} start", e.id);
        assert!(on_boundary(t, last.x, last.y), "{} end", e.id);
    }
}

#[test]
fn layout_is_deterministic() {
    let g = sample();
    let first = g.try_layout().unwrap();
    let second = g.try_layout().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().to_string(), second.to_json().to_string());
}

#[test]
fn same_rank_vertices_keep_node_separation() {
    let g = sample();
    let out = g.layout();
    let sep = g.attrs().layout.node_sep;
    let max_rank = out.vertices().iter().map(|v| v.rank).max().unwrap();
    for rank in 0..=max_rank {
        let mut layer: Vec<&PositionedVertex> =
            out.vertices().iter().filter(|v| v.rank == rank).collect();
        layer.sort_by(|a, b| a.x.total_cmp(&b.x));
        for pair in layer.windows(2) {
            let gap = pair[1].left() - (pair[0].left() + pair[0].width);
            assert!(gap >= sep - EPS, "{} / {}: {gap}", pair[0].id, pair[1].id);
        }
    }
}

fn assert_contained(out: &PositionedGraph, margin_x: f64, margin_y: f64) {
    let (w, h) = (out.width(), out.height());
    let inside = |x: f64, y: f64| {
        x >= margin_x - EPS && x <= w - margin_x + EPS && y >= margin_y - EPS && y <= h - margin_y + EPS
    };
    for v in out.vertices() {
        assert!(inside(v.left(), v.top()), "{}", v.id);
        assert!(inside(v.left() + v.width, v.top() + v.height), "{}", v.id);
    }
    for e in out.edges() {
        for p in &e.points {
            assert!(inside(p.x, p.y), "{}", e.id);
        }
    }
    let b = out.bounds();
    assert!((b.min_x - margin_x).abs() < EPS);
    assert!((b.min_y - margin_y).abs() < EPS);
    assert!((b.width() + 2.0 * margin_x - w).abs() < EPS);
    assert!((b.height() + 2.0 * margin_y - h).abs() < EPS);
}

#[test]
fn drawing_contains_everything_inside_the_margins() {
    let out = sample().layout();
    assert_contained(&out, 8.0, 8.0);

    let mut g = sample();
    let attrs = g
        .attrs()
        .merged_with(&serde_json::json!({
            "layout": { "rank_dir": "LR", "margin_x": 20.0, "margin_y": 3.0 }
        }))
        .unwrap();
    g.set_attrs(attrs);
    assert_contained(&g.layout(), 20.0, 3.0);
}

#[test]
fn long_edges_bend_through_intermediate_ranks() {
    let out = sample().layout();
    let e = out
        .edges()
        .iter()
        .find(|e| e.source == "a" && e.target == "f" && !e.feedback)
        .unwrap();
    assert!(e.points.len() > 2);
}

#[test]
fn self_loops_get_a_loop_path() {
    let out = sample().layout();
    let e = out
        .edges()
        .iter()
        .find(|e| e.source == "e" && e.target == "e")
        .unwrap();
    assert!(e.points.len() >= 5);
    let v = out.vertex("e").unwrap();
    assert!(e.points.iter().any(|p| p.x > v.x + v.width / 2.0));
}

#[test]
fn labeled_edges_carry_a_label_box() {
    let out = sample().layout();
    let e = out
        .edges()
        .iter()
        .find(|e| e.render.label.as_deref() == Some("long label"))
        .unwrap();
    assert!(e.label.width > 0.0 && e.label.height > 0.0);
    let b = out.bounds();
    assert!(e.label.x - e.label.width / 2.0 >= b.min_x - EPS);
    assert!(e.label.x + e.label.width / 2.0 <= b.max_x + EPS);
}

#[test]
fn measured_sizes_come_from_the_label_and_explicit_sizes_win() {
    let mut g = DirectedGraph::default();
    g.new_vertex(VertexAttrs::with_label("AB")).unwrap();
    let mut half = VertexAttrs::with_label("AB");
    half.layout.shape_w = Some(100.0);
    g.new_vertex(half).unwrap();
    g.new_vertex_with(
        VertexAttrs::with_label("AB"),
        VertexOptions {
            compute_bounding_box: false,
        },
    )
    .unwrap();

    let out = g.layout();
    let measured = &out.vertices()[0];
    // two columns at 14px plus 12px side margins; one line plus 8px top/bottom margins
    assert!((measured.width - (2.0 * 14.0 * 0.6 + 24.0)).abs() < EPS);
    assert!((measured.height - (14.0 * 1.2 + 16.0)).abs() < EPS);
    assert_eq!(out.vertices()[1].width, 100.0);
    assert!((out.vertices()[1].height - measured.height).abs() < EPS);
    assert_eq!(out.vertices()[2].width, 0.0);
    assert_eq!(out.vertices()[2].height, 0.0);
}

struct FixedSizer;

impl SizeProvider for FixedSizer {
    fn vertex_size(&self, _id: &str, _attrs: &VertexAttrs) -> Size {
        Size {
            width: 70.0,
            height: 10.0,
        }
    }

    fn edge_label_size(&self, _attrs: &strata::EdgeAttrs) -> Size {
        Size {
            width: 12.0,
            height: 6.0,
        }
    }
}

#[test]
fn custom_size_providers_are_used_for_unsized_elements() {
    let mut g = DirectedGraph::default();
    let a = g.new_vertex(VertexAttrs::default()).unwrap();
    let b = g.new_vertex(sized("fixed", 20.0, 20.0)).unwrap();
    g.new_edge(a, b, EdgeAttrs::default()).unwrap();
    g.new_edge_with(
        b,
        a,
        EdgeAttrs::default(),
        EdgeOptions {
            compute_bounding_box: false,
        },
    )
    .unwrap();

    let out = g.try_layout_with(&FixedSizer).unwrap();
    assert_eq!(out.vertices()[0].width, 70.0);
    assert_eq!(out.vertices()[1].width, 20.0);
    assert_eq!(out.edges()[0].label.width, 12.0);
    assert_eq!(out.edges()[1].label.width, 0.0);
}

#[test]
fn empty_graph_lays_out_to_the_margins() {
    let out = DirectedGraph::default().layout();
    assert!(out.vertices().is_empty());
    assert_eq!(out.width(), 16.0);
    assert_eq!(out.height(), 16.0);
}
