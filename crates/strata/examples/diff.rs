//! Diffs two versions of a graph and writes both colored drawings to the working directory.

use strata::{DirectedGraph, classify, diff};

const BEFORE: &str = "digraph { a -> b; b -> c; c -> d; a -> d [label=skip] }";
const AFTER: &str = "digraph { a -> b; b -> x; x -> d; a -> d [label=\"skip it\"] }";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut before = DirectedGraph::from_dot(BEFORE)?;
    let mut after = DirectedGraph::from_dot(AFTER)?;

    let report = classify(&before, &after);
    for (id, class) in &report.vertices {
        println!("vertex {id}: {class:?}");
    }
    for (edge, class) in &report.edges {
        println!("edge {} ({} -> {}): {class:?}", edge.id, edge.source, edge.target);
    }

    diff(&mut before, &mut after);
    std::fs::write("diff-before.svg", before.try_layout()?.to_svg().to_string())?;
    std::fs::write("diff-after.svg", after.try_layout()?.to_svg().to_string())?;
    Ok(())
}
