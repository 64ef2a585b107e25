//! Normalize long edges by inserting synthetic vertices.
//!
//! An edge `v -> w` with `rank(w) - rank(v) > 1` is replaced by a chain through one dummy per
//! intervening rank, so ordering and positioning only ever see rank-adjacent edges. `undo`
//! collapses each chain back into the original edge, collecting the dummies' coordinates as
//! the edge's routing points.

use crate::graphlib::EdgeKey;
use crate::util::fresh_node_id;
use crate::{Dummy, EdgeLabel, LayoutGraph, NodeLabel, Point};

pub fn run(g: &mut LayoutGraph) {
    g.graph_mut().dummy_chains.clear();
    for e in g.edge_keys() {
        normalize_edge(g, e);
    }
    tracing::debug!(
        chains = g.graph().dummy_chains.len(),
        nodes = g.node_count(),
        "normalize: long edges split"
    );
}

fn normalize_edge(g: &mut LayoutGraph, e: EdgeKey) {
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    if w_rank == v_rank + 1 {
        return;
    }
    let Some(mut edge_label) = g.take_edge(&e) else {
        return;
    };
    edge_label.points.clear();

    let horizontal = g.graph().rankdir.is_horizontal();
    let dummy_size = g.graph().dummy_size;
    let (dummy_w, dummy_h) = if horizontal {
        (0.0, dummy_size)
    } else {
        (dummy_size, 0.0)
    };

    let mut prev = e.v.clone();
    for r in (v_rank + 1)..w_rank {
        let mut node = NodeLabel {
            width: dummy_w,
            height: dummy_h,
            rank: Some(r),
            dummy: Some(Dummy::Edge),
            edge_label: Some(edge_label.clone()),
            edge_obj: Some(e.clone()),
            ..Default::default()
        };
        if edge_label.label_rank == Some(r) {
            node.width = edge_label.width;
            node.height = edge_label.height;
            node.dummy = Some(Dummy::EdgeLabel);
            node.labelpos = Some(edge_label.labelpos);
        }

        let dummy_id = fresh_node_id(g, "_d");
        g.set_node(dummy_id.clone(), node);
        if r == v_rank + 1 {
            g.graph_mut().dummy_chains.push(dummy_id.clone());
        }

        g.set_edge_named(
            prev,
            dummy_id.clone(),
            e.name.clone(),
            Some(EdgeLabel {
                weight: edge_label.weight,
                ..Default::default()
            }),
        );
        prev = dummy_id;
    }

    g.set_edge_named(
        prev,
        e.w.clone(),
        e.name.clone(),
        Some(EdgeLabel {
            weight: edge_label.weight,
            ..Default::default()
        }),
    );
}

pub fn undo(g: &mut LayoutGraph) {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    for start in chains {
        let Some(start_node) = g.node(&start) else {
            continue;
        };
        let (Some(mut orig_label), Some(edge_obj)) =
            (start_node.edge_label.clone(), start_node.edge_obj.clone())
        else {
            continue;
        };

        let mut v = start;
        while let Some(node) = g.node(&v) {
            if node.dummy.is_none() {
                break;
            }
            let next = g.successors(&v).first().map(|s| s.to_string());

            if let (Some(x), Some(y)) = (node.x, node.y) {
                orig_label.points.push(Point { x, y });
                if node.dummy == Some(Dummy::EdgeLabel) {
                    orig_label.x = Some(x);
                    orig_label.y = Some(y);
                    orig_label.width = node.width;
                    orig_label.height = node.height;
                }
            }

            g.remove_node(&v);
            let Some(next) = next else {
                break;
            };
            v = next;
        }

        g.set_edge_key(edge_obj, orig_label);
    }
}
