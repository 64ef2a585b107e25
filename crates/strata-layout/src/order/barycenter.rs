use crate::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;

/// Which adjacent layer a sweep reads positions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Predecessors (the layer above, for a downward sweep).
    InEdges,
    /// Successors (the layer below, for an upward sweep).
    OutEdges,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: String,
    /// Weighted mean position of the neighbors; `None` when the vertex has none.
    pub barycenter: Option<f64>,
    pub weight: f64,
}

/// Computes the barycenter of every vertex in `movable` against the positions in `fixed`.
pub fn barycenter(
    g: &LayoutGraph,
    movable: &[String],
    fixed: &HashMap<String, usize>,
    relationship: Relationship,
) -> Vec<BarycenterEntry> {
    movable
        .iter()
        .map(|v| {
            let edges = match relationship {
                Relationship::InEdges => g.in_edges(v, None),
                Relationship::OutEdges => g.out_edges(v, None),
            };
            let mut sum = 0.0;
            let mut weight = 0.0;
            for e in edges {
                let other = match relationship {
                    Relationship::InEdges => &e.v,
                    Relationship::OutEdges => &e.w,
                };
                let Some(&pos) = fixed.get(other) else {
                    continue;
                };
                let w = g.edge_by_key(&e).map(|l| l.weight).unwrap_or(1.0);
                sum += w * pos as f64;
                weight += w;
            }
            BarycenterEntry {
                v: v.clone(),
                barycenter: (weight > 0.0).then(|| sum / weight),
                weight,
            }
        })
        .collect()
}

/// Reorders a layer by barycenter. Vertices without neighbors keep their current index as key;
/// the sort is stable, so equal keys keep the previous order.
pub fn sort_layer(entries: &[BarycenterEntry]) -> Vec<String> {
    let mut keyed: Vec<(f64, usize, &str)> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.barycenter.unwrap_or(i as f64), i, e.v.as_str()))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, _, v)| v.to_string()).collect()
}
