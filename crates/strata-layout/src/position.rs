//! Coordinate assignment.
//!
//! Works in the internal top-to-bottom frame (see [`crate::coordinate_system`]): `y` follows the
//! rank, `x` follows the order. Each layer is first packed at minimum separation and centered on
//! `x = 0`, then [`crate::RELAX_PASSES`] passes pull every vertex towards the weighted centroid
//! of its neighbors in the adjacent layers. Each pass solves the per-layer placement exactly as
//! an isotonic regression, so minimum separation holds after every pass.

use crate::util::build_layer_matrix;
use crate::{Dummy, LayoutGraph, NodeLabel, RELAX_PASSES};
use rustc_hash::FxHashMap as HashMap;

pub fn position(g: &mut LayoutGraph) {
    let layering = build_layer_matrix(g);
    position_y(g, &layering);

    let gaps = layer_gaps(g, &layering);
    let mut xs: HashMap<String, f64> = HashMap::default();
    for (layer, gaps) in layering.iter().zip(&gaps) {
        let total: f64 = gaps.iter().sum();
        let mut x = -total / 2.0;
        for (i, v) in layer.iter().enumerate() {
            x += gaps[i];
            xs.insert(v.clone(), x);
        }
    }

    for pass in 0..RELAX_PASSES {
        let ranks: Vec<usize> = if pass % 2 == 0 {
            (0..layering.len()).collect()
        } else {
            (0..layering.len()).rev().collect()
        };
        for r in ranks {
            relax_layer(g, &layering[r], &gaps[r], &mut xs);
        }
    }

    g.for_each_node_mut(|id, n| {
        if let Some(&x) = xs.get(id) {
            n.x = Some(x);
        }
    });
}

fn position_y(g: &mut LayoutGraph, layering: &[Vec<String>]) {
    let rank_sep = g.graph().ranksep;
    let mut prev_y: f64 = 0.0;
    for layer in layering {
        let max_h = layer
            .iter()
            .filter_map(|v| g.node(v).map(|n| n.height))
            .fold(0.0, f64::max);
        for v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(prev_y + max_h / 2.0);
            }
        }
        prev_y += max_h + rank_sep;
    }
}

/// Minimum center-to-center distance between two vertices adjacent in a layer.
pub fn separation(g: &LayoutGraph, left: &NodeLabel, right: &NodeLabel) -> f64 {
    let graph = g.graph();
    let side = |n: &NodeLabel| {
        let sep = if n.is_dummy() {
            graph.edgesep
        } else {
            graph.nodesep
        };
        n.width / 2.0 + sep / 2.0
    };
    side(left) + side(right)
}

/// `gaps[r][i]` is the required distance from vertex `i - 1` to vertex `i` in layer `r`;
/// `gaps[r][0]` is zero.
fn layer_gaps(g: &LayoutGraph, layering: &[Vec<String>]) -> Vec<Vec<f64>> {
    layering
        .iter()
        .map(|layer| {
            let mut gaps = Vec::with_capacity(layer.len());
            let mut prev: Option<&NodeLabel> = None;
            for v in layer {
                let Some(node) = g.node(v) else {
                    gaps.push(0.0);
                    continue;
                };
                gaps.push(prev.map(|p| separation(g, p, node)).unwrap_or(0.0));
                prev = Some(node);
            }
            gaps
        })
        .collect()
}

/// Edge pull strength by endpoint kind: long edges (dummy to dummy) are kept straightest.
fn omega(a: &NodeLabel, b: &NodeLabel) -> f64 {
    match (a.is_dummy(), b.is_dummy()) {
        (false, false) => 1.0,
        (true, true) => 8.0,
        _ => 2.0,
    }
}

fn relax_layer(g: &LayoutGraph, layer: &[String], gaps: &[f64], xs: &mut HashMap<String, f64>) {
    if layer.is_empty() {
        return;
    }
    let mut desired: Vec<f64> = Vec::with_capacity(layer.len());
    let mut weights: Vec<f64> = Vec::with_capacity(layer.len());

    for (i, v) in layer.iter().enumerate() {
        let current = xs.get(v).copied().unwrap_or(0.0);
        let Some(node) = g.node(v) else {
            desired.push(current);
            weights.push(1.0);
            continue;
        };

        if node.dummy == Some(Dummy::SelfEdge) && i > 0 {
            desired.push(desired[i - 1] + gaps[i]);
            weights.push(weights[i - 1]);
            continue;
        }

        let mut sum = 0.0;
        let mut total = 0.0;
        for e in g.node_edges(v) {
            let other = if e.v == *v { &e.w } else { &e.v };
            let (Some(&ox), Some(other_node)) = (xs.get(other), g.node(other)) else {
                continue;
            };
            let w = omega(node, other_node) * g.edge_by_key(&e).map(|l| l.weight).unwrap_or(1.0);
            sum += w * ox;
            total += w;
        }
        if total > 0.0 {
            desired.push(sum / total);
            weights.push(total);
        } else {
            desired.push(current);
            weights.push(1.0);
        }
    }

    let placed = place_with_separation(&desired, &weights, gaps);
    for (v, x) in layer.iter().zip(placed) {
        xs.insert(v.clone(), x);
    }
}

/// Minimizes `sum(w_i * (x_i - d_i)^2)` subject to `x_i - x_{i-1} >= gaps[i]`.
///
/// Substituting `y_i = x_i - c_i`, with `c_i` the prefix sum of the gaps, turns the constraints
/// into `y` being non-decreasing, which is solved by pool-adjacent-violators.
pub fn place_with_separation(desired: &[f64], weights: &[f64], gaps: &[f64]) -> Vec<f64> {
    let mut offsets: Vec<f64> = Vec::with_capacity(desired.len());
    let mut c = 0.0;
    for (i, _) in desired.iter().enumerate() {
        if i > 0 {
            c += gaps.get(i).copied().unwrap_or(0.0);
        }
        offsets.push(c);
    }

    // (weighted sum, weight, len)
    let mut blocks: Vec<(f64, f64, usize)> = Vec::new();
    for (i, d) in desired.iter().enumerate() {
        let w = weights.get(i).copied().unwrap_or(1.0).max(f64::MIN_POSITIVE);
        blocks.push((w * (d - offsets[i]), w, 1));
        while blocks.len() >= 2 {
            let (s1, w1, n1) = blocks[blocks.len() - 2];
            let (s2, w2, n2) = blocks[blocks.len() - 1];
            if s1 / w1 <= s2 / w2 {
                break;
            }
            blocks.pop();
            let last = blocks.len() - 1;
            blocks[last] = (s1 + s2, w1 + w2, n1 + n2);
        }
    }

    let mut out: Vec<f64> = Vec::with_capacity(desired.len());
    for (s, w, n) in blocks {
        let y = s / w;
        for _ in 0..n {
            out.push(y + offsets[out.len()]);
        }
    }
    out
}
