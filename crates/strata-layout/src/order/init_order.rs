use crate::LayoutGraph;
use rustc_hash::FxHashSet as HashSet;

/// Builds an initial layering by visiting nodes depth-first along successors, starting from
/// nodes sorted by `(rank, insertion index)`. Each node is appended to its rank's layer when
/// first reached.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<String>> {
    let max_rank = g
        .nodes()
        .filter_map(|v| g.node(v).and_then(|n| n.rank))
        .max();
    let Some(max_rank) = max_rank else {
        return Vec::new();
    };

    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank + 1).max(0) as usize];
    let mut visited: HashSet<String> = HashSet::default();

    fn dfs(g: &LayoutGraph, v: &str, visited: &mut HashSet<String>, layers: &mut [Vec<String>]) {
        if !visited.insert(v.to_string()) {
            return;
        }
        let Some(rank) = g.node(v).and_then(|n| n.rank) else {
            return;
        };
        if let Some(layer) = layers.get_mut(rank.max(0) as usize) {
            layer.push(v.to_string());
        }
        for w in g.successors(v) {
            dfs(g, w, visited, layers);
        }
    }

    let mut start: Vec<(i32, usize, &str)> = g
        .nodes()
        .enumerate()
        .filter_map(|(ix, v)| Some((g.node(v)?.rank?, ix, v)))
        .collect();
    start.sort_by_key(|&(rank, ix, _)| (rank, ix));
    for (_, _, v) in start {
        dfs(g, v, &mut visited, &mut layers);
    }

    layers
}
