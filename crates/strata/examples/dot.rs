//! Reads DOT source and renders it.

use strata::DirectedGraph;

const SOURCE: &str = r##"
digraph build {
    rankdir=LR
    node [shape=box, style=filled, fillcolor="#f1f5f9"]
    edge [color="#64748b"]

    fetch -> configure -> compile -> link
    compile -> test [label="unit", style=dashed]
    link -> test -> package
    package -> fetch [label="next release", dir=back]

    subgraph release {
        node [shape=ellipse, fillcolor="0.33,0.3,1"]
        package; publish
    }
    package -> publish
}
"##;

fn main() -> strata::Result<()> {
    let g = DirectedGraph::from_dot(SOURCE)?;
    println!("{}", g.try_layout()?.to_svg().with_width_and_height());
    Ok(())
}
