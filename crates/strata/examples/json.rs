//! Lays a graph out and round-trips it through JSON.

use strata::{DirectedGraph, EdgeAttrs, PositionedGraph, VertexAttrs};

fn main() -> strata::Result<()> {
    let mut g = DirectedGraph::default();
    let a = g.new_vertex(VertexAttrs::with_label("request"))?;
    let b = g.new_vertex(VertexAttrs::with_label("handler"))?;
    let c = g.new_vertex(VertexAttrs::with_label("response"))?;
    g.new_edge(a, b, EdgeAttrs::default())?;
    g.new_edge(b, c, EdgeAttrs::default())?;
    g.new_edge(c, a, EdgeAttrs::with_label("retry"))?;

    let positioned = g.try_layout()?;
    let json = positioned.to_json();
    println!("{}", json.to_string_pretty());

    let back = PositionedGraph::from_json_str(&json.to_string())?;
    assert_eq!(back, positioned);
    let value = json.to_value();
    println!("first vertex x = {}", value["vertices"][0]["x"]);
    Ok(())
}
