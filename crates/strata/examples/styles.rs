//! Shows every vertex shape and edge style side by side, laid out left to right.

use serde_json::json;
use strata::{
    ArrowHead, Curve, Dir, DirectedGraph, EdgeAttrs, EdgeStyle, GraphAttrs, LabelPos, Shape,
    VertexAttrs, VertexStyle,
};

fn main() -> strata::Result<()> {
    let attrs = GraphAttrs::default().merged_with(&json!({
        "layout": { "rank_dir": "LR", "node_sep": 30.0 },
        "render": { "bg_color": "#fdfdfd" }
    }))?;
    let mut g = DirectedGraph::new(attrs);

    let shapes = [
        (Shape::Rectangle, VertexStyle::Solid),
        (Shape::Square, VertexStyle::Bold),
        (Shape::Circle, VertexStyle::Dashed),
        (Shape::Ellipse, VertexStyle::Dotted),
        (Shape::Diamond, VertexStyle::Solid),
        (Shape::Triangle, VertexStyle::Solid),
        (Shape::Plaintext, VertexStyle::Solid),
        (Shape::Underline, VertexStyle::Solid),
    ];
    let hub = g.new_vertex(VertexAttrs::with_label("styles"))?;
    let edge_styles = [
        EdgeStyle::Solid,
        EdgeStyle::Dashed,
        EdgeStyle::Dotted,
        EdgeStyle::Bold,
    ];
    let heads = [ArrowHead::Normal, ArrowHead::Empty, ArrowHead::Dot];

    for (i, (shape, style)) in shapes.into_iter().enumerate() {
        let mut v = VertexAttrs::with_label(format!("{shape:?}"));
        v.render.shape = shape;
        v.render.style = style;
        v.render.fill_color = Some("#e0f2fe".to_string());
        v.render.tooltip = Some(format!("a {shape:?} vertex"));
        let h = g.new_vertex(v)?;

        let mut e = EdgeAttrs::with_label(format!("{:?}", edge_styles[i % edge_styles.len()]));
        e.render.style = edge_styles[i % edge_styles.len()];
        e.render.arrow_head = heads[i % heads.len()];
        e.render.curve = if i % 2 == 0 {
            Curve::Quadratic
        } else {
            Curve::Straight
        };
        e.render.dir = if i == 3 { Dir::Both } else { Dir::Forward };
        e.render.shape = Shape::Rectangle;
        e.layout.label_pos = if i % 3 == 0 { LabelPos::L } else { LabelPos::C };
        g.new_edge(hub, h, e)?;
    }

    println!("{}", g.try_layout()?.to_svg().with_width_and_height());
    Ok(())
}
