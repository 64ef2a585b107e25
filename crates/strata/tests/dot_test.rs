use strata::{
    ArrowHead, Dir, DirectedGraph, DotParser, EdgeStyle, Error, LabelPos, RankDir, Shape,
    VertexStyle,
};

fn vertex<'a>(g: &'a DirectedGraph, id: &str) -> &'a strata::VertexAttrs {
    g.vertex(g.find_vertex(id).unwrap()).unwrap()
}

#[test]
fn parses_nodes_edges_and_chains() {
    let dot = DotParser::parse(
        r#"
        // comment
        digraph G {
            a; b
            a -> b -> c [color=red];
            d
        }
        "#,
    )
    .unwrap();
    assert!(dot.directed);
    assert!(!dot.strict);
    assert_eq!(dot.id.as_deref(), Some("G"));
    assert_eq!(
        dot.nodes.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["a", "b", "c", "d"]
    );
    assert_eq!(dot.edges.len(), 2);
    assert_eq!(dot.edges[1].source, "b");
    assert_eq!(dot.edges[1].target, "c");
    assert_eq!(dot.edges[1].attrs.get("color").map(String::as_str), Some("red"));
}

#[test]
fn attribute_defaults_are_scoped_to_subgraphs() {
    let dot = DotParser::parse(
        r#"digraph {
            node [shape=box];
            a;
            subgraph cluster_0 {
                node [shape=circle];
                edge [style=dashed];
                b -> c;
            }
            d -> e;
            { f g } -> h;
        }"#,
    )
    .unwrap();
    let shape = |id: &str| dot.nodes[id].get("shape").map(String::as_str);
    assert_eq!(shape("a"), Some("box"));
    assert_eq!(shape("b"), Some("circle"));
    assert_eq!(shape("d"), Some("box"));
    assert_eq!(dot.edges[0].attrs.get("style").map(String::as_str), Some("dashed"));
    assert_eq!(dot.edges[1].attrs.get("style"), None);
    let into_h: Vec<&str> = dot
        .edges
        .iter()
        .filter(|e| e.target == "h")
        .map(|e| e.source.as_str())
        .collect();
    assert_eq!(into_h, vec!["f", "g"]);
}

#[test]
fn strict_graphs_merge_repeated_edges() {
    let dot = DotParser::parse("strict digraph { a -> b [label=one]; a -> b [color=blue] }").unwrap();
    assert!(dot.strict);
    assert_eq!(dot.edges.len(), 1);
    assert_eq!(dot.edges[0].attrs.get("label").map(String::as_str), Some("one"));
    assert_eq!(dot.edges[0].attrs.get("color").map(String::as_str), Some("blue"));

    let loose = DotParser::parse("digraph { a -> b; a -> b }").unwrap();
    assert_eq!(loose.edges.len(), 2);
}

#[test]
fn maps_attributes_onto_the_schema() {
    let g = DirectedGraph::from_dot(
        r##"digraph {
            rankdir=LR; ranksep=1; bgcolor="#eeeeee"
            node [fontsize=10]
            a [label="Line 1\nLine 2", shape=diamond, style="filled,dashed", color=red, width=2, height=0.5];
            b [label="\N!", shape=plaintext, penwidth=3, fontcolor=blue, tooltip="hi"];
            a -> b [label=go, dir=both, arrowhead=empty, arrowtail=dot, style=bold, labelpos=r, id=ab];
        }"##,
    )
    .unwrap();

    assert_eq!(g.attrs().layout.rank_dir, RankDir::LR);
    assert_eq!(g.attrs().layout.rank_sep, 72.0);
    assert_eq!(g.attrs().render.bg_color.as_deref(), Some("#eeeeee"));

    let a = vertex(&g, "a");
    assert_eq!(a.render.label.as_deref(), Some("Line 1\nLine 2"));
    assert_eq!(a.render.shape, Shape::Diamond);
    assert_eq!(a.render.style, VertexStyle::Dashed);
    assert_eq!(a.render.fill_color.as_deref(), Some("red"));
    assert_eq!(a.render.font_size, 10.0);
    assert_eq!(a.layout.shape_w, Some(144.0));
    assert_eq!(a.layout.shape_h, Some(36.0));

    let b = vertex(&g, "b");
    assert_eq!(b.render.label.as_deref(), Some("b!"));
    assert_eq!(b.render.shape, Shape::Plaintext);
    assert_eq!(b.render.pen_width, 3.0);
    assert_eq!(b.render.font_color.as_deref(), Some("blue"));
    assert_eq!(b.render.tooltip.as_deref(), Some("hi"));

    let e = g.edge(g.find_edge("ab").unwrap()).unwrap();
    assert_eq!(e.render.label.as_deref(), Some("go"));
    assert_eq!(e.render.dir, Dir::Both);
    assert_eq!(e.render.arrow_head, ArrowHead::Empty);
    assert_eq!(e.render.arrow_tail, ArrowHead::Dot);
    assert_eq!(e.render.style, EdgeStyle::Bold);
    assert_eq!(e.layout.label_pos, LabelPos::R);
}

#[test]
fn unknown_attributes_are_skipped() {
    let g = DirectedGraph::from_dot("digraph { splines=ortho; a [peripheries=2]; a -> b [weight=5] }")
        .unwrap();
    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn undirected_graphs_are_a_type_mismatch() {
    let dot = DotParser::parse("graph { a -- b }").unwrap();
    assert!(!dot.directed);
    let err = dot.to_directed().unwrap_err();
    assert!(matches!(
        err,
        Error::TypeMismatch {
            expected: "directed",
            found: "undirected"
        }
    ));
}

#[test]
fn syntax_errors_report_line_and_column() {
    let err = DotParser::parse("digraph {\n  a -> ;\n}").unwrap_err();
    match err {
        Error::DotParse { line, column, .. } => assert_eq!((line, column), (2, 8)),
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        DotParser::parse("digraph { a -- b }"),
        Err(Error::DotParse { .. })
    ));
    assert!(matches!(
        DotParser::parse("digraph { a -> b"),
        Err(Error::DotParse { .. })
    ));
    assert!(matches!(
        DotParser::parse("digraph { a [label=\"open }"),
        Err(Error::DotParse { line: 1, column: 20, .. })
    ));
}

#[test]
fn ports_and_html_labels() {
    let g = DirectedGraph::from_dot("digraph { a:n -> b:s:e; a [label=<<b>A</b>>] }").unwrap();
    assert_eq!(vertex(&g, "a").render.label.as_deref(), Some("<b>A</b>"));
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn parsed_graphs_lay_out() {
    let g = DirectedGraph::from_dot(
        "digraph { a -> b; b -> c; c -> a; a -> c [label=\"shortcut\"]; c -> c }",
    )
    .unwrap();
    let out = g.try_layout().unwrap();
    assert_eq!(out.vertices().len(), 3);
    assert_eq!(out.edges().len(), 5);
}
