//! Rank assignment.
//!
//! Every node gets the length of the longest path reaching it from a source:
//! `rank(v) = max(0, max over u -> v of rank(u) + minlen(u -> v))`. Nodes are visited in
//! topological order with ready nodes released in insertion order, so the result depends only
//! on the graph as built.

use crate::graphlib::alg;
use crate::{LayoutError, LayoutGraph, Result};
use rustc_hash::FxHashMap as HashMap;

/// Assigns `rank` to every node. The graph must already be acyclic (see [`crate::acyclic`]).
pub fn longest_path(g: &mut LayoutGraph) -> Result<()> {
    let order = alg::topsort(g).map_err(|err| {
        LayoutError::invariant(format!("ranking requires an acyclic graph: {err}"))
    })?;

    let mut ranks: HashMap<String, i32> = HashMap::default();
    for v in &order {
        let mut rank: i32 = 0;
        for e in g.in_edges(v, None) {
            let Some(&u_rank) = ranks.get(&e.v) else {
                continue;
            };
            let minlen = g.edge_by_key(&e).map(|l| l.minlen.max(1)).unwrap_or(1) as i32;
            rank = rank.max(u_rank + minlen);
        }
        ranks.insert(v.clone(), rank);
    }

    g.for_each_node_mut(|id, n| {
        n.rank = ranks.get(id).copied();
    });
    Ok(())
}

/// Doubles every edge's `minlen` and halves `ranksep` when some edge has a label box, so that
/// each edge crosses a middle rank that can host its label.
pub fn make_space_for_edge_labels(g: &mut LayoutGraph) {
    let any_label = g
        .edges()
        .any(|e| g.edge_by_key(e).is_some_and(crate::EdgeLabel::has_label_box));
    if !any_label {
        return;
    }

    let horizontal = g.graph().rankdir.is_horizontal();
    {
        let graph = g.graph_mut();
        graph.label_ranks = true;
        graph.ranksep /= 2.0;
    }
    g.for_each_edge_mut(|_, e| {
        e.minlen *= 2;
        if e.labelpos != crate::LabelPos::C {
            if horizontal {
                e.height += e.labeloffset;
            } else {
                e.width += e.labeloffset;
            }
        }
    });
}

/// Picks the rank that will host each labeled edge's label box.
pub fn assign_label_ranks(g: &mut LayoutGraph) {
    if !g.graph().label_ranks {
        return;
    }
    let mut label_ranks: Vec<(crate::graphlib::EdgeKey, i32)> = Vec::new();
    for e in g.edges() {
        let Some(label) = g.edge_by_key(e) else {
            continue;
        };
        if !label.has_label_box() {
            continue;
        }
        let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
        let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
        label_ranks.push((e.clone(), (v_rank + w_rank) / 2));
    }
    for (e, rank) in label_ranks {
        if let Some(label) = g.edge_mut_by_key(&e) {
            label.label_rank = Some(rank);
        }
    }
}

/// Number of ranks spanned by an edge beyond its `minlen`.
pub fn slack(g: &LayoutGraph, e: &crate::graphlib::EdgeKey) -> i32 {
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    let minlen = g.edge_by_key(e).map(|l| l.minlen as i32).unwrap_or(1);
    w_rank - v_rank - minlen
}
