//! Invariant checks run between pipeline phases.
//!
//! A failure here means an earlier pass left the graph in a state later passes cannot handle;
//! it is reported as [`LayoutError::InvariantViolation`] instead of producing a broken drawing.

use crate::position::separation;
use crate::util::build_layer_matrix;
use crate::{LayoutError, LayoutGraph, Result};

/// Every node is ranked and every edge joins consecutive ranks in its stored direction.
pub fn check_layering(g: &LayoutGraph) -> Result<()> {
    for v in g.nodes() {
        if g.node(v).and_then(|n| n.rank).is_none_or(|r| r < 0) {
            return Err(LayoutError::invariant(format!(
                "node {v:?} has no valid rank"
            )));
        }
    }
    for e in g.edges() {
        let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
        let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
        if w_rank - v_rank != 1 {
            return Err(LayoutError::invariant(format!(
                "edge {:?} -> {:?} spans ranks {v_rank} -> {w_rank}",
                e.v, e.w
            )));
        }
    }
    Ok(())
}

/// Every node is placed and vertices adjacent in a layer are at least their separation apart.
pub fn check_positions(g: &LayoutGraph) -> Result<()> {
    const EPS: f64 = 1e-6;
    for layer in build_layer_matrix(g) {
        let mut prev: Option<(&str, f64)> = None;
        for v in &layer {
            let Some(node) = g.node(v) else {
                continue;
            };
            let (Some(x), Some(y)) = (node.x, node.y) else {
                return Err(LayoutError::invariant(format!("node {v:?} was not positioned")));
            };
            if !x.is_finite() || !y.is_finite() {
                return Err(LayoutError::invariant(format!(
                    "node {v:?} has non-finite position ({x}, {y})"
                )));
            }
            if let Some((p, px)) = prev {
                let min = g
                    .node(p)
                    .map(|pn| separation(g, pn, node))
                    .unwrap_or(0.0);
                if x - px < min - EPS {
                    return Err(LayoutError::invariant(format!(
                        "nodes {p:?} and {v:?} are {} apart, need {min}",
                        x - px
                    )));
                }
            }
            prev = Some((v.as_str(), x));
        }
    }
    Ok(())
}
