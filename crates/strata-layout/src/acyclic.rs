//! Break cycles by reversing a feedback arc set (FAS).
//!
//! The FAS is collected with a depth-first traversal that starts from every node in insertion
//! order and picks each edge that points back to a node on the current recursion path.
//! Self-loops never enter the set; they are handled by [`crate::self_edges`].

use crate::LayoutGraph;
use crate::graphlib::{EdgeKey, alg};
use std::collections::BTreeSet;

pub fn run(g: &mut LayoutGraph) {
    let fas = dfs_fas(g);
    tracing::debug!(
        cycles = alg::find_cycles(g).len(),
        reversed = fas.len(),
        "acyclic: feedback arc set"
    );

    for e in fas {
        let Some(mut label) = g.take_edge(&e) else {
            continue;
        };
        label.forward_name = e.name.clone();
        label.reversed = true;
        label.feedback = true;

        let name = unique_rev_name(g, &e.w, &e.v);
        g.set_edge_named(e.w, e.v, Some(name), Some(label));
    }
}

/// Restores the original direction of every reversed edge and flips its points to match.
pub fn undo(g: &mut LayoutGraph) {
    for e in g.edge_keys() {
        if !g.edge_by_key(&e).is_some_and(|l| l.reversed) {
            continue;
        }
        let Some(mut label) = g.take_edge(&e) else {
            continue;
        };
        let forward_name = label.forward_name.take();
        label.reversed = false;
        label.points.reverse();
        g.set_edge_named(e.w, e.v, forward_name, Some(label));
    }
}

fn unique_rev_name(g: &LayoutGraph, v: &str, w: &str) -> String {
    let mut i = 1usize;
    loop {
        let candidate = format!("rev{i}");
        if !g.has_edge(v, w, Some(&candidate)) {
            return candidate;
        }
        i += 1;
    }
}

fn dfs_fas(g: &LayoutGraph) -> Vec<EdgeKey> {
    fn dfs(
        g: &LayoutGraph,
        v: &str,
        visited: &mut BTreeSet<String>,
        stack: &mut BTreeSet<String>,
        fas: &mut Vec<EdgeKey>,
    ) {
        if !visited.insert(v.to_string()) {
            return;
        }
        stack.insert(v.to_string());
        for e in g.out_edges(v, None) {
            if e.is_self_loop() {
                continue;
            }
            if stack.contains(&e.w) {
                fas.push(e);
            } else {
                dfs(g, &e.w, visited, stack, fas);
            }
        }
        stack.remove(v);
    }

    let mut fas: Vec<EdgeKey> = Vec::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    let mut stack: BTreeSet<String> = BTreeSet::new();
    for v in g.nodes() {
        dfs(g, v, &mut visited, &mut stack, &mut fas);
    }
    fas
}
