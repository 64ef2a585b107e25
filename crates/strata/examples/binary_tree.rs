//! A complete binary tree whose vertices are tinted by depth with HSV colors.

use strata::{DirectedGraph, EdgeAttrs, Shape, VertexAttrs, VertexHandle};

const DEPTH: u32 = 4;

fn main() -> strata::Result<()> {
    let mut g = DirectedGraph::default();
    let mut level: Vec<VertexHandle> = Vec::new();
    let mut next = 1u32;

    for depth in 0..DEPTH {
        let hue = f64::from(depth) / f64::from(DEPTH);
        let count = 1usize << depth;
        let mut current = Vec::with_capacity(count);
        for i in 0..count {
            let mut attrs = VertexAttrs::with_label(next.to_string());
            attrs.render.shape = Shape::Circle;
            attrs.render.fill_color = Some(format!("{hue:.3},0.4,1"));
            attrs.render.color = Some(format!("{hue:.3},0.8,0.6"));
            next += 1;
            let v = g.new_vertex(attrs)?;
            if let Some(&parent) = level.get(i / 2) {
                g.new_edge(parent, v, EdgeAttrs::default())?;
            }
            current.push(v);
        }
        level = current;
    }

    println!("{}", g.try_layout()?.to_svg().with_width_and_height());
    Ok(())
}
