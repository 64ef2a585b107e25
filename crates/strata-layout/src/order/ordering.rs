use super::{Relationship, barycenter, cross_count, init_order, sort_layer};
use crate::{LayoutGraph, MAX_SWEEPS, SWEEPS_WITHOUT_IMPROVEMENT};
use rustc_hash::FxHashMap as HashMap;

/// Assigns `order` to every ranked node, keeping the layering with the fewest crossings.
pub fn order(g: &mut LayoutGraph) {
    let mut layering = init_order(g);
    if layering.is_empty() {
        return;
    }

    let mut best_cc = cross_count(g, &layering);
    let mut best = layering.clone();
    let mut last_best: usize = 0;
    tracing::trace!(crossings = best_cc, "order: initial layering");

    for i in 0..MAX_SWEEPS {
        if best_cc == 0.0 {
            break;
        }
        let relationship = if i % 2 == 0 {
            Relationship::InEdges
        } else {
            Relationship::OutEdges
        };
        sweep(g, &mut layering, relationship);

        let cc = cross_count(g, &layering);
        tracing::trace!(sweep = i, crossings = cc, "order: sweep");
        if cc < best_cc {
            best_cc = cc;
            best = layering.clone();
            last_best = 0;
        } else {
            last_best += 1;
            if last_best >= SWEEPS_WITHOUT_IMPROVEMENT {
                break;
            }
        }
    }

    tracing::debug!(crossings = best_cc, layers = best.len(), "order: best layering");
    assign_order(g, &best);
}

fn sweep(g: &LayoutGraph, layering: &mut [Vec<String>], relationship: Relationship) {
    let ranks: Vec<usize> = match relationship {
        Relationship::InEdges => (1..layering.len()).collect(),
        Relationship::OutEdges => (0..layering.len().saturating_sub(1)).rev().collect(),
    };
    for r in ranks {
        let fixed_rank = match relationship {
            Relationship::InEdges => r - 1,
            Relationship::OutEdges => r + 1,
        };
        let fixed: HashMap<String, usize> = layering[fixed_rank]
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        let entries = barycenter(g, &layering[r], &fixed, relationship);
        layering[r] = sort_layer(&entries);
    }
}

fn assign_order(g: &mut LayoutGraph, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}
