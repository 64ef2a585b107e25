//! Builds a small pipeline graph and prints it as SVG.

use strata::{DirectedGraph, EdgeAttrs, VertexAttrs};

fn main() -> strata::Result<()> {
    let mut g = DirectedGraph::default();
    let parse = g.new_vertex(VertexAttrs::with_label("parse"))?;
    let check = g.new_vertex(VertexAttrs::with_label("type check"))?;
    let lower = g.new_vertex(VertexAttrs::with_label("lower"))?;
    let emit = g.new_vertex(VertexAttrs::with_label("emit"))?;

    g.new_edge(parse, check, EdgeAttrs::default())?;
    g.new_edge(check, lower, EdgeAttrs::default())?;
    g.new_edge(lower, emit, EdgeAttrs::default())?;
    g.new_edge(parse, emit, EdgeAttrs::with_label("fast path"))?;

    let positioned = g.try_layout()?;
    println!("{}", positioned.to_svg().with_width_and_height());
    Ok(())
}
